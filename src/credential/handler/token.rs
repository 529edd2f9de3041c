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

//! Opaque token handler.
//!
//! Tokens are produced by pluggable token providers. The handler keeps the
//! last issued token of every type as the current one of the account, so a
//! newly issued token supersedes the previous token of the same type.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::credential::error::CredentialProviderError;
use crate::credential::handler::{
    AccountLookup, CredentialHandler, CredentialMatcher, HandlerContext, validate_credentials,
};
use crate::credential::types::{
    Account, CredentialKind, CredentialStorage, CredentialUpdate, CredentialValue, Credentials,
    OpaqueToken, StorageKind, StoredCredential,
};
use crate::credential::utils;

/// Producer and verifier of one type of opaque tokens.
pub trait TokenProvider: Send + Sync + std::fmt::Debug {
    /// Type of the tokens produced.
    fn token_type(&self) -> &str;

    /// Whether the provider understands the token.
    fn supports(&self, token: &OpaqueToken) -> bool {
        token.token_type == self.token_type()
    }

    /// Issue a new token for the account.
    fn issue(&self, account: &Account) -> Result<OpaqueToken, CredentialProviderError>;

    /// Verify the token itself (format, signature, lifetime).
    fn validate(&self, token: &OpaqueToken) -> bool;
}

#[derive(Clone, Debug, Default)]
pub struct TokenCredentialHandler {
    providers: Vec<Arc<dyn TokenProvider>>,
}

struct TokenMatcher<'a> {
    provider: &'a dyn TokenProvider,
}

fn stored_token_of_type(storage: &CredentialStorage, token_type: &str) -> bool {
    matches!(&storage.value, StoredCredential::Token { token_type: stored, .. } if stored == token_type)
}

#[async_trait]
impl CredentialMatcher for TokenMatcher<'_> {
    async fn credential_storage(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        credentials: &Credentials,
    ) -> Result<Option<CredentialStorage>, CredentialProviderError> {
        let CredentialValue::Token(value) = &credentials.value else {
            return Ok(None);
        };
        let storages = ctx
            .store
            .retrieve_credentials(account, StorageKind::Token)
            .await?;
        Ok(utils::latest_effective_credential(
            storages
                .iter()
                .filter(|storage| stored_token_of_type(storage, &value.token.token_type)),
            ctx.now(),
        )
        .cloned())
    }

    async fn matches(
        &self,
        _ctx: &HandlerContext<'_>,
        _account: &Account,
        storage: Option<&CredentialStorage>,
        credentials: &Credentials,
    ) -> Result<bool, CredentialProviderError> {
        let (
            CredentialValue::Token(value),
            Some(CredentialStorage {
                value: StoredCredential::Token {
                    value: stored_value,
                    ..
                },
                ..
            }),
        ) = (&credentials.value, storage)
        else {
            return Ok(false);
        };
        if !self.provider.validate(&value.token) {
            debug!("Token rejected by the {} provider", self.provider.token_type());
            return Ok(false);
        }
        Ok(value
            .token
            .value
            .expose_secret()
            .as_bytes()
            .ct_eq(stored_value.as_bytes())
            .into())
    }
}

impl TokenCredentialHandler {
    pub fn new(providers: Vec<Arc<dyn TokenProvider>>) -> Self {
        Self { providers }
    }

    pub fn add_provider(&mut self, provider: Arc<dyn TokenProvider>) {
        self.providers.push(provider);
    }

    /// Issue a token of the type for the account and store it as the current
    /// one.
    pub async fn issue_token(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        token_type: &str,
    ) -> Result<OpaqueToken, CredentialProviderError> {
        let provider = self
            .providers
            .iter()
            .find(|provider| provider.token_type() == token_type)
            .ok_or_else(|| CredentialProviderError::NoTokenProvider(token_type.to_string()))?;
        let token = provider.issue(account)?;
        self.update(
            ctx,
            account,
            &CredentialUpdate::Token(token.clone()),
            None,
            None,
        )
        .await?;
        Ok(token)
    }
}

#[async_trait]
impl CredentialHandler for TokenCredentialHandler {
    fn name(&self) -> &'static str {
        "token"
    }

    fn supported_credentials(&self) -> &[CredentialKind] {
        &[CredentialKind::Token]
    }

    async fn validate(
        &self,
        ctx: &HandlerContext<'_>,
        credentials: &mut Credentials,
    ) -> Result<(), CredentialProviderError> {
        let CredentialValue::Token(value) = &credentials.value else {
            return Err(CredentialProviderError::UnsupportedCredential {
                handler: self.name(),
                kind: credentials.kind(),
            });
        };
        let provider = self
            .providers
            .iter()
            .find(|provider| provider.supports(&value.token))
            .ok_or_else(|| CredentialProviderError::NoTokenProvider(value.token.token_type.clone()))?
            .clone();
        let lookup = AccountLookup::Id(value.token.subject.clone());
        let matcher = TokenMatcher {
            provider: provider.as_ref(),
        };
        validate_credentials(ctx, credentials, lookup, &matcher).await
    }

    async fn update(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        credential: &CredentialUpdate,
        effective_date: Option<DateTime<Utc>>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<(), CredentialProviderError> {
        let CredentialUpdate::Token(token) = credential else {
            return Err(CredentialProviderError::UnsupportedCredential {
                handler: self.name(),
                kind: credential.kind(),
            });
        };
        ctx.store(
            account,
            StoredCredential::Token {
                token_type: token.token_type.clone(),
                value: token.value.expose_secret().to_string(),
            },
            effective_date,
            expiry_date.or(token.expiration),
        )
        .await
    }
}
