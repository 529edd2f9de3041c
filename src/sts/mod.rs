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

//! # Security token service
//!
//! WS-Trust request processing: Issue, Renew, Validate and Cancel.
//!
//! For every request the STS builds a [request
//! context](crate::sts::types::WsTrustRequestContext), applies the
//! configured defaults (issuer, lifetime, key type and size) and hands it to
//! the [security token
//! provider](crate::sts::backend::SecurityTokenProvider) which knows the
//! actual token format. For issue requests the proof-of-possession key is
//! negotiated first (see [proof]).
//!
//! Issued and renewed tokens are signed with the STS key pair and encrypted
//! for the service they apply to when configured so. Tokens presented for
//! renewal or validation get their signature verified with the same key
//! pair. A broken signature fails the renewal while during validation it is
//! reported as an invalid status.

use secrecy::SecretSlice;
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub mod backend;
pub mod constants;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod proof;
pub mod types;
pub mod utils;

#[cfg(test)]
pub use mock::MockStsProvider;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::plugin_manager::PluginManager;
use crate::sts::backend::{
    SecurityTokenProvider, SignatureParameters, StaticStsConfiguration, StsConfiguration,
    TokenEncryptor, TokenSigner,
};
use crate::sts::constants::{DEFAULT_KEY_SIZE, KEY_TYPE_BEARER, STATUS_TYPE};
use crate::sts::error::WsTrustError;
use crate::sts::proof::{ProofKeyNegotiator, check_key_size, create_random_secret};
use crate::sts::types::{
    KeyPair, Principal, RequestSecurityToken, RequestSecurityTokenResponse, RequestType, Status,
    TokenElement, WsTrustRequestContext,
};
use crate::sts::utils::{create_default_lifetime, on_behalf_of_principal, parse_applies_to};

pub use types::StsApi;

#[derive(Clone, Debug)]
pub struct StsProvider {
    configuration: Arc<dyn StsConfiguration>,
    token_provider: Arc<dyn SecurityTokenProvider>,
    signer: Option<Arc<dyn TokenSigner>>,
    encryptor: Option<Arc<dyn TokenEncryptor>>,
    clock: Arc<dyn Clock>,
}

impl StsProvider {
    pub fn new(config: &Config, plugin_manager: &PluginManager) -> Result<Self, WsTrustError> {
        Self::with_clock(config, plugin_manager, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: &Config,
        plugin_manager: &PluginManager,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, WsTrustError> {
        let configuration = if let Some(configuration) = plugin_manager.get_sts_configuration() {
            configuration.clone()
        } else {
            let mut builder = StaticStsConfiguration::builder(&config.sts);
            for (dialect, processor) in plugin_manager.get_claims_processors() {
                builder = builder.claims_processor(dialect, processor.clone());
            }
            Arc::new(builder.build()?)
        };
        let token_provider = plugin_manager
            .get_security_token_provider(config.sts.token_provider.as_deref())
            .ok_or(WsTrustError::MissingCollaborator("security token provider"))?
            .clone();

        Ok(Self {
            configuration,
            token_provider,
            signer: plugin_manager
                .get_token_signer(config.sts.signature_provider.as_deref())
                .cloned(),
            encryptor: plugin_manager
                .get_token_encryptor(config.sts.encryption_provider.as_deref())
                .cloned(),
            clock,
        })
    }

    fn signer(&self) -> Result<&dyn TokenSigner, WsTrustError> {
        self.signer
            .as_deref()
            .ok_or(WsTrustError::MissingCollaborator("token signer"))
    }

    fn encryptor(&self) -> Result<&dyn TokenEncryptor, WsTrustError> {
        self.encryptor
            .as_deref()
            .ok_or(WsTrustError::MissingCollaborator("token encryptor"))
    }

    /// Key pair used for the token signatures, if signing is enabled.
    fn signing_key_pair(&self) -> Option<&KeyPair> {
        if self.configuration.sign_issued_token() {
            self.configuration.sts_key_pair()
        } else {
            None
        }
    }

    fn apply_default_lifetime(&self, request: &mut RequestSecurityToken) {
        let timeout = self.configuration.issued_token_timeout();
        if request.lifetime.is_none() && !timeout.is_zero() {
            debug!("Lifetime has not been specified, using the default timeout {timeout}");
            request.lifetime = Some(create_default_lifetime(self.clock.now(), timeout));
        }
    }

    fn new_context(&self, request: RequestSecurityToken, caller: &Principal) -> WsTrustRequestContext {
        let mut context = WsTrustRequestContext::new(request, caller.clone());
        context.token_issuer = Some(self.configuration.sts_name().to_string());
        context.on_behalf_of_principal = context
            .request
            .on_behalf_of
            .as_ref()
            .and_then(on_behalf_of_principal);
        context
    }
}

/// Token wrapped in a renew, validate or cancel target.
fn target_token(
    target: Option<&types::TokenTarget>,
    name: &'static str,
    token_name: &'static str,
) -> Result<TokenElement, WsTrustError> {
    target
        .ok_or(WsTrustError::MissingElement(name))?
        .token
        .clone()
        .ok_or(WsTrustError::MissingElement(token_name))
}

impl StsApi for StsProvider {
    #[tracing::instrument(level = "info", skip(self, request))]
    fn handle(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError> {
        debug!("Processing {} request", request.request_type);
        let mut response = match request.request_type {
            RequestType::Issue => self.issue(request, caller)?,
            RequestType::Renew => self.renew(request, caller)?,
            RequestType::Validate => self.validate(request, caller)?,
            RequestType::Cancel => self.cancel(request, caller)?,
        };
        self.post_process(&mut response, request)?;
        Ok(response)
    }

    #[tracing::instrument(level = "debug", skip(self, request))]
    fn issue(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError> {
        let mut request = request.clone();

        let mut provider_public_key = None;
        let service_name = request
            .applies_to
            .as_ref()
            .and_then(parse_applies_to)
            .map(str::to_string);
        if let Some(service_name) = service_name {
            debug!("Locating the token type and the public key of {service_name}");
            if request.token_type.is_none() {
                request.token_type = self.configuration.token_type_for_service(&service_name);
            }
            provider_public_key = self.configuration.service_provider_public_key(&service_name);
        }

        self.apply_default_lifetime(&mut request);

        let claimed_attributes = match &request.claims {
            Some(claims) => match self.configuration.claims_processor(&claims.dialect) {
                Some(processor) => Some(processor.process_claims(claims, caller)?),
                None => {
                    debug!(
                        "No claims processor found for the dialect {}, claims are ignored",
                        claims.dialect
                    );
                    None
                }
            },
            None => None,
        };

        if request.key_type.is_none() {
            debug!("Key type has not been specified, issuing a bearer token");
            request.key_type = Some(KEY_TYPE_BEARER.into());
        }
        request.key_size = match request.key_size.unwrap_or_default() {
            0 => Some(DEFAULT_KEY_SIZE),
            bits => Some(check_key_size(bits)?),
        };

        let proof = ProofKeyNegotiator::new(self.configuration.as_ref(), self.encryptor.as_deref())
            .negotiate(&request, caller, provider_public_key.as_ref())?;

        let mut context = self.new_context(request, caller);
        context.claimed_attributes = claimed_attributes;
        context.service_provider_public_key = provider_public_key;
        context.proof_token_info = proof.proof_token_info;

        self.token_provider.issue_token(&mut context)?;
        let token = context
            .security_token
            .take()
            .ok_or(WsTrustError::NullToken("issued"))?;
        debug!("Issued {} token", token.token_type);

        let request = context.request;
        Ok(RequestSecurityTokenResponse {
            context: request.context,
            token_type: request.token_type.or(Some(token.token_type)),
            lifetime: request.lifetime,
            applies_to: request.applies_to,
            key_size: request.key_size,
            key_type: request.key_type,
            requested_security_token: Some(token.token_value),
            requested_proof_token: proof.requested_proof_token,
            entropy: proof.server_entropy,
            requested_attached_reference: context.attached_reference,
            requested_unattached_reference: context.unattached_reference,
            ..Default::default()
        })
    }

    #[tracing::instrument(level = "debug", skip(self, request))]
    fn renew(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError> {
        let mut token = target_token(
            request.renew_target.as_ref(),
            "renew target",
            "security token in the renew target",
        )?;

        if let Some(key_pair) = self.signing_key_pair() {
            token.setup_id_attribute();
            match self.signer()?.validate(&token, &key_pair.public_key) {
                Ok(true) => trace!("Security token signature verified"),
                Ok(false) => {
                    return Err(WsTrustError::Signature(
                        "digital signature is invalid".into(),
                    ));
                }
                Err(err) => return Err(WsTrustError::Signature(err.to_string())),
            }
        } else {
            trace!("Security token signature is NOT verified");
        }

        let mut request = request.clone();
        self.apply_default_lifetime(&mut request);

        let mut context = self.new_context(request, caller);
        context.qname = Some(token.qname());
        self.token_provider.renew_token(&mut context)?;
        let token = context
            .security_token
            .take()
            .ok_or(WsTrustError::NullToken("renewed"))?;

        let request = context.request;
        Ok(RequestSecurityTokenResponse {
            context: request.context,
            token_type: request.token_type.or(Some(token.token_type)),
            lifetime: request.lifetime,
            requested_security_token: Some(token.token_value),
            requested_attached_reference: context.attached_reference,
            requested_unattached_reference: context.unattached_reference,
            ..Default::default()
        })
    }

    #[tracing::instrument(level = "debug", skip(self, request))]
    fn validate(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError> {
        let mut token = target_token(
            request.validate_target.as_ref(),
            "validate target",
            "security token in the validate target",
        )?;
        token.setup_id_attribute();

        let mut request = request.clone();
        if request.token_type.is_none() {
            request.token_type = Some(STATUS_TYPE.into());
        }
        let mut context = self.new_context(request, caller);

        let mut status = None;
        if let Some(key_pair) = self.signing_key_pair() {
            status = match self.signer()?.validate(&token, &key_pair.public_key) {
                Ok(true) => None,
                Ok(false) => Some(Status::invalid(
                    "Validation failure: digital signature is invalid",
                )),
                Err(err) => Some(Status::invalid(format!(
                    "Validation failure: unable to verify digital signature: {err}"
                ))),
            };
        } else {
            trace!("Security token signature is NOT verified");
        }

        if status.is_none() {
            context.qname = Some(token.qname());
            self.token_provider.validate_token(&mut context)?;
            status = context.status.take();
        }
        if let Some(status) = &status {
            debug!("Security token validated with status {}", status.code);
        }

        Ok(RequestSecurityTokenResponse {
            context: context.request.context,
            token_type: context.request.token_type,
            status,
            ..Default::default()
        })
    }

    #[tracing::instrument(level = "debug", skip(self, request))]
    fn cancel(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError> {
        let token = target_token(
            request.cancel_target.as_ref(),
            "cancel target",
            "security token in the cancel target",
        )?;

        let mut context = self.new_context(request.clone(), caller);
        context.qname = Some(token.qname());
        self.token_provider.cancel_token(&mut context)?;

        Ok(RequestSecurityTokenResponse {
            context: context.request.context,
            requested_token_cancelled: true,
            ..Default::default()
        })
    }

    #[tracing::instrument(level = "debug", skip(self, response, request))]
    fn post_process(
        &self,
        response: &mut RequestSecurityTokenResponse,
        request: &RequestSecurityToken,
    ) -> Result<(), WsTrustError> {
        if !matches!(request.request_type, RequestType::Issue | RequestType::Renew) {
            return Ok(());
        }

        if let Some(key_pair) = self.signing_key_pair() {
            let token = response
                .requested_security_token
                .as_mut()
                .ok_or(WsTrustError::MissingElement("requested security token"))?;
            let parameters = SignatureParameters {
                canonicalization_method: self.configuration.canonicalization_method().into(),
                digest_method: self.configuration.digest_method().into(),
                signature_method: request
                    .signature_algorithm
                    .clone()
                    .unwrap_or_else(|| self.configuration.signature_method().into()),
                reference: token.setup_id_attribute(),
            };
            trace!("Signing the {} element", token.qname());
            self.signer()?
                .sign(token, key_pair, &parameters)
                .map_err(|source| WsTrustError::Signing { source })?;
        }

        if self.configuration.encrypt_issued_token() {
            let public_key = request
                .applies_to
                .as_ref()
                .and_then(parse_applies_to)
                .and_then(|service_name| {
                    trace!("Locating the public key of {service_name}");
                    self.configuration.service_provider_public_key(service_name)
                });
            match public_key {
                None => {
                    warn!("Security token should be encrypted but no encrypting key could be found");
                }
                Some(public_key) => {
                    let token = response
                        .requested_security_token
                        .as_mut()
                        .ok_or(WsTrustError::MissingElement("requested security token"))?;
                    let key_size = response
                        .key_size
                        .or(request.key_size)
                        .filter(|size| *size > 0)
                        .unwrap_or(DEFAULT_KEY_SIZE);
                    let key_size = check_key_size(key_size)?;
                    let secret: SecretSlice<u8> =
                        create_random_secret((key_size / 8) as usize).into();
                    self.encryptor()?
                        .encrypt_element(token, &public_key, &secret, key_size)
                        .map_err(|source| WsTrustError::Encryption { source })?;
                }
            }
        }
        Ok(())
    }
}
