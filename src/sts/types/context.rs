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

use crate::sts::types::{
    Attribute, KeyInfo, Principal, PublicKey, QName, RequestSecurityToken, SecurityToken, Status,
    TokenReference,
};

/// State of a single WS-Trust request handed to the security token
/// provider.
///
/// The STS fills the request related fields, the provider sets the
/// resulting token (issue, renew), the status (validate) and the optional
/// token references.
#[derive(Clone, Debug, PartialEq)]
pub struct WsTrustRequestContext {
    pub request: RequestSecurityToken,
    pub caller_principal: Principal,
    pub on_behalf_of_principal: Option<Principal>,
    pub claimed_attributes: Option<Vec<Attribute>>,
    pub token_issuer: Option<String>,
    /// Public key of the service the token is issued for.
    pub service_provider_public_key: Option<PublicKey>,
    /// Proof key the issued token is bound to.
    pub proof_token_info: Option<KeyInfo>,
    /// Name of the token to renew, validate or cancel.
    pub qname: Option<QName>,
    pub security_token: Option<SecurityToken>,
    pub attached_reference: Option<TokenReference>,
    pub unattached_reference: Option<TokenReference>,
    pub status: Option<Status>,
}

impl WsTrustRequestContext {
    pub fn new(request: RequestSecurityToken, caller_principal: Principal) -> Self {
        Self {
            request,
            caller_principal,
            on_behalf_of_principal: None,
            claimed_attributes: None,
            token_issuer: None,
            service_provider_public_key: None,
            proof_token_info: None,
            qname: None,
            security_token: None,
            attached_reference: None,
            unattached_reference: None,
            status: None,
        }
    }

    /// Token type of the request.
    pub fn token_type(&self) -> Option<&str> {
        self.request.token_type.as_deref()
    }
}
