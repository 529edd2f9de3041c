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

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::credential::error::CredentialProviderError;
use crate::credential::handler::{
    AccountLookup, CredentialHandler, CredentialMatcher, HandlerContext, validate_credentials,
};
use crate::credential::password_hashing::PasswordEncoder;
use crate::credential::secure_random::SecureRandomProvider;
use crate::credential::types::{
    Account, CredentialKind, CredentialStorage, CredentialUpdate, CredentialValue, Credentials,
    StorageKind, StoredCredential,
};

/// Salted password handler.
#[derive(Clone, Debug)]
pub struct PasswordCredentialHandler {
    encoder: Arc<dyn PasswordEncoder>,
    secure_random: Arc<SecureRandomProvider>,
}

fn salted(salt: &str, password: &SecretString) -> SecretString {
    SecretString::from(format!("{salt}{}", password.expose_secret()))
}

impl PasswordCredentialHandler {
    pub fn new(encoder: Arc<dyn PasswordEncoder>, secure_random: Arc<SecureRandomProvider>) -> Self {
        Self {
            encoder,
            secure_random,
        }
    }

    /// Validate the password part of the username/password or the TOTP
    /// credentials.
    pub(crate) async fn validate_password(
        &self,
        ctx: &HandlerContext<'_>,
        credentials: &mut Credentials,
    ) -> Result<(), CredentialProviderError> {
        let username = match &credentials.value {
            CredentialValue::UsernamePassword(value) => value.username.clone(),
            CredentialValue::Totp(value) => value.username.clone(),
            other => {
                return Err(CredentialProviderError::UnsupportedCredential {
                    handler: self.name(),
                    kind: other.kind(),
                });
            }
        };
        validate_credentials(ctx, credentials, AccountLookup::LoginName(username), self).await
    }

    /// Encode the password with a fresh salt and store it.
    pub(crate) async fn store_password(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        password: &SecretString,
        effective_date: Option<DateTime<Utc>>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<(), CredentialProviderError> {
        let salt = self.secure_random.generate_salt()?;
        let encoded_hash = self.encoder.encode(&salted(&salt, password)).await?;
        ctx.store(
            account,
            StoredCredential::EncodedPassword { salt, encoded_hash },
            effective_date,
            expiry_date,
        )
        .await
    }
}

#[async_trait]
impl CredentialMatcher for PasswordCredentialHandler {
    async fn credential_storage(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        _credentials: &Credentials,
    ) -> Result<Option<CredentialStorage>, CredentialProviderError> {
        ctx.effective_credential(account, StorageKind::EncodedPassword)
            .await
    }

    async fn matches(
        &self,
        _ctx: &HandlerContext<'_>,
        _account: &Account,
        storage: Option<&CredentialStorage>,
        credentials: &Credentials,
    ) -> Result<bool, CredentialProviderError> {
        let password = match &credentials.value {
            CredentialValue::UsernamePassword(value) => &value.password,
            CredentialValue::Totp(value) => &value.password,
            _ => return Ok(false),
        };
        if password.expose_secret().is_empty() {
            return Ok(false);
        }
        let Some(CredentialStorage {
            value: StoredCredential::EncodedPassword { salt, encoded_hash },
            ..
        }) = storage
        else {
            return Ok(false);
        };
        Ok(self
            .encoder
            .verify(&salted(salt, password), encoded_hash)
            .await?)
    }
}

#[async_trait]
impl CredentialHandler for PasswordCredentialHandler {
    fn name(&self) -> &'static str {
        "password"
    }

    fn supported_credentials(&self) -> &[CredentialKind] {
        &[CredentialKind::Password]
    }

    async fn validate(
        &self,
        ctx: &HandlerContext<'_>,
        credentials: &mut Credentials,
    ) -> Result<(), CredentialProviderError> {
        if credentials.kind() != CredentialKind::Password {
            return Err(CredentialProviderError::UnsupportedCredential {
                handler: self.name(),
                kind: credentials.kind(),
            });
        }
        self.validate_password(ctx, credentials).await
    }

    async fn update(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        credential: &CredentialUpdate,
        effective_date: Option<DateTime<Utc>>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<(), CredentialProviderError> {
        match credential {
            CredentialUpdate::Password(password) => {
                self.store_password(ctx, account, password, effective_date, expiry_date)
                    .await
            }
            other => Err(CredentialProviderError::UnsupportedCredential {
                handler: self.name(),
                kind: other.kind(),
            }),
        }
    }
}
