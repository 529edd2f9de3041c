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

//! # Credential provider
//!
//! Validation and update of the caller credentials.
//!
//! Following credential kinds are supported by the built-in handlers:
//!
//! - username and password (salted with a secure random numeric salt and
//!   encoded with the configured [password
//!   encoder](crate::credential::password_hashing::PasswordEncoder)),
//! - HTTP digest (only the HA1 of the realm is stored),
//! - X.509 client certificate,
//! - password combined with a time based one-time code of a device,
//! - opaque tokens produced by the registered token providers.
//!
//! Every credential value is stored as a new record with an effective and
//! an expiry date. Older records are never modified, the latest record in
//! effect is used for the validation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

pub mod backend;
pub mod digest;
pub mod error;
pub mod handler;
#[cfg(test)]
pub mod mock;
pub mod password_hashing;
pub mod secure_random;
pub mod types;
pub mod utils;

#[cfg(test)]
pub use mock::MockCredentialProvider;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::credential::backend::{CredentialStore, memory::MemoryCredentialStore};
use crate::credential::error::CredentialProviderError;
use crate::credential::handler::{
    CredentialHandler, CredentialHandlerRegistry, HandlerContext,
    digest::DigestCredentialHandler, password::PasswordCredentialHandler,
    token::TokenCredentialHandler, totp::TotpCredentialHandler,
    x509::X509CertificateCredentialHandler,
};
use crate::credential::password_hashing::password_encoder;
use crate::credential::secure_random::SecureRandomProvider;
use crate::credential::types::{
    Account, CredentialStorage, CredentialUpdate, Credentials, OpaqueToken, StorageKind,
};
use crate::plugin_manager::PluginManager;

pub use types::CredentialApi;

#[derive(Clone, Debug)]
pub struct CredentialProvider {
    backend_driver: Box<dyn CredentialStore>,
    handlers: CredentialHandlerRegistry,
    token_handler: TokenCredentialHandler,
    clock: Arc<dyn Clock>,
}

impl CredentialProvider {
    pub fn new(
        config: &Config,
        plugin_manager: &PluginManager,
    ) -> Result<Self, CredentialProviderError> {
        Self::with_clock(config, plugin_manager, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: &Config,
        plugin_manager: &PluginManager,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CredentialProviderError> {
        let backend_driver = if let Some(driver) =
            plugin_manager.get_credential_store(config.credential.driver.clone())
        {
            driver.clone()
        } else {
            match config.credential.driver.as_str() {
                "memory" => Box::new(MemoryCredentialStore::default()),
                other => {
                    return Err(CredentialProviderError::UnsupportedDriver(other.to_string()));
                }
            }
        };

        config.totp.validate()?;
        let password = PasswordCredentialHandler::new(
            password_encoder(config, plugin_manager)?,
            Arc::new(SecureRandomProvider::new(config, clock.clone())?),
        );
        let token_handler =
            TokenCredentialHandler::new(plugin_manager.get_token_providers().to_vec());
        let defaults: Vec<Arc<dyn CredentialHandler>> = vec![
            Arc::new(password.clone()),
            Arc::new(DigestCredentialHandler),
            Arc::new(X509CertificateCredentialHandler),
            Arc::new(TotpCredentialHandler::new(password, config.totp.clone())),
            Arc::new(token_handler.clone()),
        ];
        let mut handlers = CredentialHandlerRegistry::with_defaults(defaults);
        for handler in plugin_manager.get_credential_handlers() {
            handlers.register(handler.clone());
        }

        Ok(Self {
            backend_driver,
            handlers,
            token_handler,
            clock,
        })
    }

    fn context(&self) -> HandlerContext<'_> {
        HandlerContext::new(self.backend_driver.as_ref(), self.clock.as_ref())
    }

    fn handler(
        &self,
        kind: types::CredentialKind,
    ) -> Result<&Arc<dyn CredentialHandler>, CredentialProviderError> {
        let store_type = self.backend_driver.store_type();
        self.handlers.lookup(kind, store_type).ok_or_else(|| {
            debug!("No credential handler for {kind} credentials in the {store_type} store");
            CredentialProviderError::NoHandler {
                kind,
                store: store_type.to_string(),
            }
        })
    }
}

#[async_trait]
impl CredentialApi for CredentialProvider {
    /// Validate the credentials.
    #[tracing::instrument(level = "info", skip(self, credentials))]
    async fn validate_credentials(
        &self,
        credentials: &mut Credentials,
    ) -> Result<(), CredentialProviderError> {
        let handler = self.handler(credentials.kind())?;
        handler.validate(&self.context(), credentials).await?;
        debug!(
            "{} credentials validated with status {:?}",
            credentials.kind(),
            credentials.status
        );
        Ok(())
    }

    /// Store a new credential value for the account.
    #[tracing::instrument(level = "info", skip(self, credential))]
    async fn update_credential(
        &self,
        account: &Account,
        credential: &CredentialUpdate,
        effective_date: Option<DateTime<Utc>>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<(), CredentialProviderError> {
        self.handler(credential.kind())?
            .update(
                &self.context(),
                account,
                credential,
                effective_date,
                expiry_date,
            )
            .await
    }

    /// Get the current stored credential of the account.
    #[tracing::instrument(level = "debug", skip(self))]
    async fn retrieve_current_credential(
        &self,
        account: &Account,
        kind: StorageKind,
    ) -> Result<Option<CredentialStorage>, CredentialProviderError> {
        self.backend_driver
            .retrieve_current_credential(account, kind, self.clock.now())
            .await
    }

    /// Issue a token of the requested type for the account.
    #[tracing::instrument(level = "info", skip(self))]
    async fn issue_token(
        &self,
        account: &Account,
        token_type: &str,
    ) -> Result<OpaqueToken, CredentialProviderError> {
        self.token_handler
            .issue_token(&self.context(), account, token_type)
            .await
    }
}
