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

//! STS configuration backed by the configuration file and in memory maps.

use chrono::TimeDelta;
use derive_builder::Builder;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::StsSection;
use crate::error::BuilderError;
use crate::sts::backend::{ClaimsProcessor, StsConfiguration};
use crate::sts::types::{Certificate, KeyPair, PublicKey};

/// Service (relying party) the STS issues tokens for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceProvider {
    /// Token type issued when the request does not specify one.
    pub token_type: Option<String>,
    /// Key the issued tokens and proof keys are encrypted for.
    pub public_key: Option<PublicKey>,
}

#[derive(Builder, Debug)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(pattern = "owned")]
pub struct StaticStsConfiguration {
    settings: StsSection,

    #[builder(default, setter(custom))]
    services: HashMap<String, ServiceProvider>,

    #[builder(default, setter(custom))]
    certificates: HashMap<String, Certificate>,

    #[builder(default, setter(strip_option))]
    key_pair: Option<KeyPair>,

    #[builder(default, setter(custom))]
    claims_processors: HashMap<String, Arc<dyn ClaimsProcessor>>,
}

impl StaticStsConfigurationBuilder {
    /// Register a service by its endpoint address.
    pub fn service<S: Into<String>>(mut self, address: S, service: ServiceProvider) -> Self {
        self.services
            .get_or_insert_with(HashMap::new)
            .insert(address.into(), service);
        self
    }

    /// Put a certificate on file for the principal.
    pub fn certificate<S: Into<String>>(mut self, alias: S, certificate: Certificate) -> Self {
        self.certificates
            .get_or_insert_with(HashMap::new)
            .insert(alias.into(), certificate);
        self
    }

    pub fn claims_processor<S: Into<String>>(
        mut self,
        dialect: S,
        processor: Arc<dyn ClaimsProcessor>,
    ) -> Self {
        self.claims_processors
            .get_or_insert_with(HashMap::new)
            .insert(dialect.into(), processor);
        self
    }
}

impl StaticStsConfiguration {
    pub fn builder(settings: &StsSection) -> StaticStsConfigurationBuilder {
        StaticStsConfigurationBuilder::default().settings(settings.clone())
    }
}

impl StsConfiguration for StaticStsConfiguration {
    fn sts_name(&self) -> &str {
        &self.settings.name
    }

    fn issued_token_timeout(&self) -> TimeDelta {
        self.settings.token_timeout()
    }

    fn sign_issued_token(&self) -> bool {
        self.settings.sign_token
    }

    fn encrypt_issued_token(&self) -> bool {
        self.settings.encrypt_token
    }

    fn canonicalization_method(&self) -> &str {
        &self.settings.canonicalization_method
    }

    fn signature_method(&self) -> &str {
        &self.settings.signature_method
    }

    fn digest_method(&self) -> &str {
        &self.settings.digest_method
    }

    fn token_type_for_service(&self, service_name: &str) -> Option<String> {
        self.services
            .get(service_name)
            .and_then(|service| service.token_type.clone())
    }

    fn service_provider_public_key(&self, service_name: &str) -> Option<PublicKey> {
        self.services
            .get(service_name)
            .and_then(|service| service.public_key.clone())
    }

    fn certificate(&self, alias: &str) -> Option<Certificate> {
        self.certificates.get(alias).cloned()
    }

    fn sts_key_pair(&self) -> Option<&KeyPair> {
        self.key_pair.as_ref()
    }

    fn claims_processor(&self, dialect: &str) -> Option<Arc<dyn ClaimsProcessor>> {
        self.claims_processors.get(dialect).cloned()
    }
}
