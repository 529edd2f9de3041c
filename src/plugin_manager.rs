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

//! # Plugin manager
//!
//! Everything the core does not implement itself is supplied by the hosting
//! service as a plugin: credential store drivers, password encoders,
//! additional credential handlers, opaque token providers and the STS
//! collaborators (security token provider, signer, encryptor, claims
//! processors and the STS configuration).
//!
//! The [PluginManager] is handed to the providers during the start and
//! they pick the plugins named in the configuration.
use std::collections::HashMap;
use std::sync::Arc;

use crate::credential::backend::CredentialStore;
use crate::credential::handler::CredentialHandler;
use crate::credential::handler::token::TokenProvider;
use crate::credential::password_hashing::PasswordEncoder;
use crate::sts::backend::{
    ClaimsProcessor, SecurityTokenProvider, StsConfiguration, TokenEncryptor, TokenSigner,
};

/// Plugin manager allowing to pass custom plugins implementing required
/// trait during the service start.
#[derive(Clone, Default)]
pub struct PluginManager {
    /// Credential store drivers.
    credential_stores: HashMap<String, Box<dyn CredentialStore>>,
    /// Password encoders.
    password_encoders: HashMap<String, Arc<dyn PasswordEncoder>>,
    /// Credential handlers consulted before the built-in ones.
    credential_handlers: Vec<Arc<dyn CredentialHandler>>,
    /// Opaque token providers.
    token_providers: Vec<Arc<dyn TokenProvider>>,
    /// Security token providers of the STS.
    security_token_providers: HashMap<String, Arc<dyn SecurityTokenProvider>>,
    /// Token signers.
    token_signers: HashMap<String, Arc<dyn TokenSigner>>,
    /// Token encryptors.
    token_encryptors: HashMap<String, Arc<dyn TokenEncryptor>>,
    /// Claims processors by the claims dialect.
    claims_processors: HashMap<String, Arc<dyn ClaimsProcessor>>,
    /// STS configuration replacing the one built from the configuration file.
    sts_configuration: Option<Arc<dyn StsConfiguration>>,
}

/// Plugin with the name, or the only registered one when no name is given.
fn named_or_single<'a, T: ?Sized>(
    plugins: &'a HashMap<String, Arc<T>>,
    name: Option<&str>,
) -> Option<&'a Arc<T>> {
    match name {
        Some(name) => plugins.get(name),
        None if plugins.len() == 1 => plugins.values().next(),
        None => None,
    }
}

impl PluginManager {
    /// Register credential store driver.
    pub fn register_credential_store<S: AsRef<str>>(
        &mut self,
        name: S,
        plugin: Box<dyn CredentialStore>,
    ) {
        self.credential_stores
            .insert(name.as_ref().to_string(), plugin);
    }

    /// Get registered credential store driver.
    #[allow(clippy::borrowed_box)]
    pub fn get_credential_store<S: AsRef<str>>(
        &self,
        name: S,
    ) -> Option<&Box<dyn CredentialStore>> {
        self.credential_stores.get(name.as_ref())
    }

    /// Register password encoder.
    pub fn register_password_encoder<S: AsRef<str>>(
        &mut self,
        name: S,
        plugin: Arc<dyn PasswordEncoder>,
    ) {
        self.password_encoders
            .insert(name.as_ref().to_string(), plugin);
    }

    /// Get registered password encoder.
    pub fn get_password_encoder<S: AsRef<str>>(
        &self,
        name: S,
    ) -> Option<&Arc<dyn PasswordEncoder>> {
        self.password_encoders.get(name.as_ref())
    }

    /// Register credential handler.
    pub fn register_credential_handler(&mut self, plugin: Arc<dyn CredentialHandler>) {
        self.credential_handlers.push(plugin);
    }

    /// Get registered credential handlers in the registration order.
    pub fn get_credential_handlers(&self) -> &[Arc<dyn CredentialHandler>] {
        &self.credential_handlers
    }

    /// Register opaque token provider.
    pub fn register_token_provider(&mut self, plugin: Arc<dyn TokenProvider>) {
        self.token_providers.push(plugin);
    }

    /// Get registered opaque token providers.
    pub fn get_token_providers(&self) -> &[Arc<dyn TokenProvider>] {
        &self.token_providers
    }

    /// Register security token provider.
    pub fn register_security_token_provider<S: AsRef<str>>(
        &mut self,
        name: S,
        plugin: Arc<dyn SecurityTokenProvider>,
    ) {
        self.security_token_providers
            .insert(name.as_ref().to_string(), plugin);
    }

    /// Get registered security token provider.
    pub fn get_security_token_provider(
        &self,
        name: Option<&str>,
    ) -> Option<&Arc<dyn SecurityTokenProvider>> {
        named_or_single(&self.security_token_providers, name)
    }

    /// Register token signer.
    pub fn register_token_signer<S: AsRef<str>>(&mut self, name: S, plugin: Arc<dyn TokenSigner>) {
        self.token_signers.insert(name.as_ref().to_string(), plugin);
    }

    /// Get registered token signer.
    pub fn get_token_signer(&self, name: Option<&str>) -> Option<&Arc<dyn TokenSigner>> {
        named_or_single(&self.token_signers, name)
    }

    /// Register token encryptor.
    pub fn register_token_encryptor<S: AsRef<str>>(
        &mut self,
        name: S,
        plugin: Arc<dyn TokenEncryptor>,
    ) {
        self.token_encryptors
            .insert(name.as_ref().to_string(), plugin);
    }

    /// Get registered token encryptor.
    pub fn get_token_encryptor(&self, name: Option<&str>) -> Option<&Arc<dyn TokenEncryptor>> {
        named_or_single(&self.token_encryptors, name)
    }

    /// Register claims processor for the claims dialect.
    pub fn register_claims_processor<S: AsRef<str>>(
        &mut self,
        dialect: S,
        plugin: Arc<dyn ClaimsProcessor>,
    ) {
        self.claims_processors
            .insert(dialect.as_ref().to_string(), plugin);
    }

    /// Get registered claims processors by the claims dialect.
    pub fn get_claims_processors(&self) -> &HashMap<String, Arc<dyn ClaimsProcessor>> {
        &self.claims_processors
    }

    /// Set the STS configuration.
    pub fn register_sts_configuration(&mut self, plugin: Arc<dyn StsConfiguration>) {
        self.sts_configuration = Some(plugin);
    }

    /// Get the STS configuration.
    pub fn get_sts_configuration(&self) -> Option<&Arc<dyn StsConfiguration>> {
        self.sts_configuration.as_ref()
    }
}
