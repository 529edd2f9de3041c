// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! WS-Trust 1.3 identifiers.

pub const BASE_NAMESPACE: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512";

pub const ISSUE_REQUEST: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Issue";
pub const RENEW_REQUEST: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Renew";
pub const VALIDATE_REQUEST: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Validate";
pub const CANCEL_REQUEST: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Cancel";

pub const KEY_TYPE_BEARER: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Bearer";
pub const KEY_TYPE_SYMMETRIC: &str =
    "http://docs.oasis-open.org/ws-sx/ws-trust/200512/SymmetricKey";
pub const KEY_TYPE_PUBLIC: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/PublicKey";

/// Key size (in bits) used when the request does not specify one.
pub const DEFAULT_KEY_SIZE: u32 = 128;
/// Largest key size (in bits) a request may ask for.
pub const MAX_KEY_SIZE: u32 = 4096;

pub const BS_TYPE_NONCE: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Nonce";
pub const CK_PSHA1: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/CK/PSHA1";

pub const STATUS_TYPE: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/RSTR/Status";
pub const STATUS_CODE_VALID: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/status/valid";
pub const STATUS_CODE_INVALID: &str =
    "http://docs.oasis-open.org/ws-sx/ws-trust/200512/status/invalid";

pub const SAML2_ASSERTION_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";
pub const SAML11_ASSERTION_NS: &str = "urn:oasis:names:tc:SAML:1.0:assertion";
pub const SAML2_TOKEN_TYPE: &str =
    "http://docs.oasis-open.org/wss/oasis-wss-saml-token-profile-1.1#SAMLV2.0";

pub const EXCLUSIVE_C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";
pub const SIGNATURE_RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
pub const DIGEST_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#sha1";
pub const DEFAULT_KEY_WRAP_ALGORITHM: &str = "http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p";
