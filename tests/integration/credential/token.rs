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

use chrono::{TimeDelta, Utc};
use eyre::Report;
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sts_core::config::Config;
use sts_core::credential::CredentialApi;
use sts_core::credential::error::CredentialProviderError;
use sts_core::credential::handler::token::TokenProvider;
use sts_core::credential::types::{Account, CredentialStatus, Credentials, OpaqueToken};
use sts_core::plugin_manager::PluginManager;

use super::setup;

/// Issues `session-<n>` tokens valid for an hour.
#[derive(Debug, Default)]
struct SessionTokenProvider {
    counter: AtomicU64,
}

impl TokenProvider for SessionTokenProvider {
    fn token_type(&self) -> &str {
        "session"
    }

    fn issue(&self, account: &Account) -> Result<OpaqueToken, CredentialProviderError> {
        Ok(OpaqueToken {
            token_type: "session".into(),
            value: format!("session-{}", self.counter.fetch_add(1, Ordering::SeqCst)).into(),
            subject: account.id.clone(),
            expiration: Some(Utc::now() + TimeDelta::hours(1)),
        })
    }

    fn validate(&self, token: &OpaqueToken) -> bool {
        token.value.expose_secret().starts_with("session-")
    }
}

#[tokio::test]
async fn test_issued_token() -> Result<(), Report> {
    let mut plugin_manager = PluginManager::default();
    plugin_manager.register_token_provider(Arc::new(SessionTokenProvider::default()));
    let (provider, store, john) = setup(&Config::default(), plugin_manager)?;

    let token = provider.issue_token(&john, "session").await?;
    assert_eq!(john.id, token.subject);

    let mut credentials: Credentials = token.clone().into();
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Valid, credentials.status);
    assert_eq!(Some(john.clone()), credentials.validated_account);

    let forged = OpaqueToken {
        value: "session-1000".into(),
        ..token.clone()
    };
    let mut credentials: Credentials = forged.into();
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Invalid, credentials.status);

    store.set_account_enabled(&john.id, false)?;
    let mut credentials: Credentials = token.into();
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::AccountDisabled, credentials.status);
    Ok(())
}

#[tokio::test]
async fn test_token_without_provider() -> Result<(), Report> {
    let (provider, _, john) = setup(&Config::default(), PluginManager::default())?;
    assert!(matches!(
        provider.issue_token(&john, "session").await,
        Err(CredentialProviderError::NoTokenProvider(_))
    ));
    Ok(())
}
