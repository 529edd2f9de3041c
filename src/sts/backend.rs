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

//! Collaborators of the STS.
//!
//! The token format, the XML signature and the XML encryption are not
//! implemented by the STS itself. The hosting service registers
//! implementations of these traits in the
//! [plugin manager](crate::plugin_manager::PluginManager).

use chrono::TimeDelta;
use secrecy::SecretSlice;
use std::sync::Arc;

use crate::sts::error::ProcessingError;
use crate::sts::types::{
    Attribute, Certificate, Claims, KeyInfo, KeyPair, Principal, PublicKey, TokenElement,
    WsTrustRequestContext,
};

pub mod configuration;
pub use configuration::{ServiceProvider, StaticStsConfiguration};

/// Issuer, renewer, validator and canceller of the security tokens.
///
/// Every operation works on the request context: the issued or renewed token
/// is put into [`WsTrustRequestContext::security_token`], the validation
/// outcome into [`WsTrustRequestContext::status`].
#[cfg_attr(test, mockall::automock)]
pub trait SecurityTokenProvider: Send + Sync + std::fmt::Debug {
    fn issue_token(&self, context: &mut WsTrustRequestContext) -> Result<(), ProcessingError>;

    fn renew_token(&self, context: &mut WsTrustRequestContext) -> Result<(), ProcessingError>;

    fn validate_token(&self, context: &mut WsTrustRequestContext) -> Result<(), ProcessingError>;

    fn cancel_token(&self, context: &mut WsTrustRequestContext) -> Result<(), ProcessingError>;
}

/// Parameters of the token signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureParameters {
    pub canonicalization_method: String,
    pub digest_method: String,
    pub signature_method: String,
    /// `#id` reference of the signed element, empty when the element has no
    /// ID.
    pub reference: String,
}

/// Enveloped XML signature of the tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenSigner: Send + Sync + std::fmt::Debug {
    /// Verify the signature of the token.
    fn validate(&self, token: &TokenElement, public_key: &PublicKey)
    -> Result<bool, ProcessingError>;

    /// Sign the token in place.
    fn sign(
        &self,
        token: &mut TokenElement,
        key_pair: &KeyPair,
        parameters: &SignatureParameters,
    ) -> Result<(), ProcessingError>;
}

/// XML encryption of the tokens and of the proof keys.
#[cfg_attr(test, mockall::automock)]
pub trait TokenEncryptor: Send + Sync + std::fmt::Debug {
    /// Replace the token with its encrypted form. The token is encrypted
    /// with the secret key which is in turn wrapped with the public key.
    fn encrypt_element(
        &self,
        token: &mut TokenElement,
        public_key: &PublicKey,
        secret_key: &SecretSlice<u8>,
        key_size: u32,
    ) -> Result<(), ProcessingError>;

    /// Wrap the proof key for the owner of the public key.
    fn encrypt_key(
        &self,
        secret: &SecretSlice<u8>,
        public_key: &PublicKey,
        key_wrap_algorithm: &str,
    ) -> Result<KeyInfo, ProcessingError>;
}

/// Resolver of the claims of one dialect.
#[cfg_attr(test, mockall::automock)]
pub trait ClaimsProcessor: Send + Sync + std::fmt::Debug {
    fn process_claims(
        &self,
        claims: &Claims,
        principal: &Principal,
    ) -> Result<Vec<Attribute>, ProcessingError>;
}

/// Settings and key material of the STS.
pub trait StsConfiguration: Send + Sync + std::fmt::Debug {
    /// Name of the STS, used as the issuer of the tokens.
    fn sts_name(&self) -> &str;

    /// Lifetime of the tokens when the request does not ask for one. Zero
    /// means no default lifetime.
    fn issued_token_timeout(&self) -> TimeDelta;

    fn sign_issued_token(&self) -> bool;

    fn encrypt_issued_token(&self) -> bool;

    fn canonicalization_method(&self) -> &str;

    /// Signature method used when the request does not specify one.
    fn signature_method(&self) -> &str;

    fn digest_method(&self) -> &str;

    /// Token type issued for the service when the request does not specify
    /// one.
    fn token_type_for_service(&self, service_name: &str) -> Option<String>;

    /// Public key of the service the tokens are issued for.
    fn service_provider_public_key(&self, service_name: &str) -> Option<PublicKey>;

    /// Certificate on file under the alias (principal name).
    fn certificate(&self, alias: &str) -> Option<Certificate>;

    fn sts_key_pair(&self) -> Option<&KeyPair>;

    fn claims_processor(&self, dialect: &str) -> Option<Arc<dyn ClaimsProcessor>>;
}
