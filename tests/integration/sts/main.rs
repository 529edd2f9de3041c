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
//

use base64::{Engine, engine::general_purpose::STANDARD};
use eyre::Report;
use secrecy::{ExposeSecret, SecretSlice};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use sts_core::config::Config;
use sts_core::plugin_manager::PluginManager;
use sts_core::provider::Provider;
use sts_core::sts::backend::{
    SecurityTokenProvider, ServiceProvider, SignatureParameters, StaticStsConfiguration,
    TokenEncryptor, TokenSigner,
};
use sts_core::sts::constants::{SAML2_ASSERTION_NS, SAML2_TOKEN_TYPE};
use sts_core::sts::error::ProcessingError;
use sts_core::sts::types::{
    KeyInfo, KeyPair, PublicKey, SecurityToken, Status, TokenElement, WsTrustRequestContext,
};

mod issue;
mod lifecycle;

const SERVICE: &str = "https://sp.example.com/acs";
const XMLENC_NS: &str = "http://www.w3.org/2001/04/xmlenc#";

fn service_key() -> PublicKey {
    PublicKey {
        algorithm: "RSA".into(),
        encoded: vec![0x30, 0x82, 0x01, 0x22],
    }
}

fn sts_key_pair() -> KeyPair {
    KeyPair::new(
        PublicKey {
            algorithm: "RSA".into(),
            encoded: vec![0x30, 0x82, 0x01, 0x0a],
        },
        vec![0x30, 0x82, 0x04, 0xa4],
    )
}

/// Issues SAML 2.0 assertions and keeps the contexts it was handed.
#[derive(Debug, Default)]
struct AssertionProvider {
    counter: AtomicU32,
    contexts: Mutex<Vec<WsTrustRequestContext>>,
}

impl AssertionProvider {
    fn last_context(&self) -> Option<WsTrustRequestContext> {
        self.contexts.lock().ok()?.last().cloned()
    }

    fn record(&self, context: &WsTrustRequestContext) -> Result<(), ProcessingError> {
        self.contexts
            .lock()
            .map_err(|err| ProcessingError::new(err.to_string()))?
            .push(context.clone());
        Ok(())
    }

    fn new_assertion(&self, context: &mut WsTrustRequestContext) -> Result<(), ProcessingError> {
        let id = format!("_a{}", self.counter.fetch_add(1, Ordering::SeqCst));
        let element = TokenElement::builder()
            .namespace(SAML2_ASSERTION_NS)
            .local_name("Assertion")
            .attributes(BTreeMap::from([("ID".to_string(), id.clone())]))
            .content(format!("<saml2:Assertion ID=\"{id}\"/>").into_bytes())
            .build()
            .map_err(|err| ProcessingError::new(err.to_string()))?;
        context.security_token = Some(SecurityToken {
            token_type: context.token_type().unwrap_or(SAML2_TOKEN_TYPE).into(),
            token_id: Some(id),
            token_value: element,
        });
        self.record(context)
    }
}

impl SecurityTokenProvider for AssertionProvider {
    fn issue_token(&self, context: &mut WsTrustRequestContext) -> Result<(), ProcessingError> {
        self.new_assertion(context)
    }

    fn renew_token(&self, context: &mut WsTrustRequestContext) -> Result<(), ProcessingError> {
        self.new_assertion(context)
    }

    fn validate_token(&self, context: &mut WsTrustRequestContext) -> Result<(), ProcessingError> {
        let known = context
            .qname
            .as_ref()
            .is_some_and(|qname| qname.local_name == "Assertion");
        context.status = Some(if known {
            Status::valid("")
        } else {
            Status::invalid("Unknown token")
        });
        self.record(context)
    }

    fn cancel_token(&self, context: &mut WsTrustRequestContext) -> Result<(), ProcessingError> {
        self.record(context)
    }
}

/// Puts the signature into the `Signature` attribute of the element.
#[derive(Debug, Default)]
struct AttributeSigner;

impl TokenSigner for AttributeSigner {
    fn validate(
        &self,
        token: &TokenElement,
        _public_key: &PublicKey,
    ) -> Result<bool, ProcessingError> {
        match token.attributes.get("Signature") {
            Some(signature) => Ok(!signature.starts_with("tampered")),
            None => Err(ProcessingError::new("no signature")),
        }
    }

    fn sign(
        &self,
        token: &mut TokenElement,
        _key_pair: &KeyPair,
        parameters: &SignatureParameters,
    ) -> Result<(), ProcessingError> {
        token.attributes.insert(
            "Signature".into(),
            format!("{}{}", parameters.signature_method, parameters.reference),
        );
        Ok(())
    }
}

/// Replaces the element with an `EncryptedData` one and wraps keys as plain
/// base64.
#[derive(Debug, Default)]
struct FakeEncryptor;

impl TokenEncryptor for FakeEncryptor {
    fn encrypt_element(
        &self,
        token: &mut TokenElement,
        _public_key: &PublicKey,
        secret_key: &SecretSlice<u8>,
        key_size: u32,
    ) -> Result<(), ProcessingError> {
        *token = TokenElement::builder()
            .namespace(XMLENC_NS)
            .local_name("EncryptedData")
            .attributes(BTreeMap::from([
                ("KeySize".to_string(), key_size.to_string()),
                (
                    "SecretLength".to_string(),
                    secret_key.expose_secret().len().to_string(),
                ),
            ]))
            .build()
            .map_err(|err| ProcessingError::new(err.to_string()))?;
        Ok(())
    }

    fn encrypt_key(
        &self,
        secret: &SecretSlice<u8>,
        _public_key: &PublicKey,
        key_wrap_algorithm: &str,
    ) -> Result<KeyInfo, ProcessingError> {
        Ok(KeyInfo::EncryptedKey {
            algorithm: key_wrap_algorithm.into(),
            cipher_value: STANDARD.encode(secret.expose_secret()),
        })
    }
}

/// Provider with the fake collaborators registered and the single service
/// `SERVICE`.
fn setup(config: Config, with_key_pair: bool) -> Result<(Provider, Arc<AssertionProvider>), Report> {
    let token_provider = Arc::new(AssertionProvider::default());
    let mut plugin_manager = PluginManager::default();
    plugin_manager.register_security_token_provider("saml", token_provider.clone());
    plugin_manager.register_token_signer("attribute", Arc::new(AttributeSigner));
    plugin_manager.register_token_encryptor("fake", Arc::new(FakeEncryptor));

    let mut configuration = StaticStsConfiguration::builder(&config.sts).service(
        SERVICE,
        ServiceProvider {
            token_type: Some(SAML2_TOKEN_TYPE.into()),
            public_key: Some(service_key()),
        },
    );
    if with_key_pair {
        configuration = configuration.key_pair(sts_key_pair());
    }
    plugin_manager.register_sts_configuration(Arc::new(configuration.build()?));

    let provider = Provider::new(config, plugin_manager)?;
    Ok((provider, token_provider))
}
