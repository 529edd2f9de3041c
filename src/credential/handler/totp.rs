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

//! Time based one-time password (RFC 6238) handler.
//!
//! The password is validated first. Only when it is accepted the one-time
//! code is checked against the current secret of the device (or of every
//! device of the account when no device is named).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use secrecy::{ExposeSecret, SecretString};
use totp_rs::{Algorithm, TOTP};
use tracing::debug;

use crate::config::{TotpAlgorithm, TotpSection};
use crate::credential::error::CredentialProviderError;
use crate::credential::handler::password::PasswordCredentialHandler;
use crate::credential::handler::{CredentialHandler, HandlerContext};
use crate::credential::types::{
    Account, CredentialKind, CredentialStatus, CredentialUpdate, CredentialValue, Credentials,
    StorageKind, StoredCredential,
};
use crate::credential::utils;

/// Build the code generator for the secret.
pub fn totp(settings: &TotpSection, secret: &[u8]) -> TOTP {
    let algorithm = match settings.algorithm {
        TotpAlgorithm::Sha1 => Algorithm::SHA1,
        TotpAlgorithm::Sha256 => Algorithm::SHA256,
        TotpAlgorithm::Sha512 => Algorithm::SHA512,
    };
    TOTP::new_unchecked(
        algorithm,
        settings.digits,
        settings.delay_window,
        settings.interval_seconds,
        secret.to_vec(),
    )
}

fn unix_seconds(at: DateTime<Utc>) -> u64 {
    u64::try_from(at.timestamp()).unwrap_or_default()
}

/// Code generated with the secret at the given time.
pub fn one_time_code(settings: &TotpSection, secret: &SecretString, at: DateTime<Utc>) -> String {
    totp(settings, secret.expose_secret().as_bytes()).generate(unix_seconds(at))
}

#[derive(Clone, Debug)]
pub struct TotpCredentialHandler {
    password: PasswordCredentialHandler,
    settings: TotpSection,
}

impl TotpCredentialHandler {
    pub fn new(password: PasswordCredentialHandler, settings: TotpSection) -> Self {
        Self { password, settings }
    }

    /// Check the code against the current secret of the devices.
    async fn check_code(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        code: &str,
        device: Option<&str>,
    ) -> Result<bool, CredentialProviderError> {
        let now = ctx.now();
        let storages = ctx.store.retrieve_credentials(account, StorageKind::Otp).await?;
        let per_device = storages
            .iter()
            .filter_map(|storage| match &storage.value {
                StoredCredential::Otp {
                    device: stored_device,
                    ..
                } if device.is_none_or(|device| stored_device.as_deref() == Some(device)) => {
                    Some((stored_device.clone(), storage))
                }
                _ => None,
            })
            .into_group_map();

        Ok(per_device.values().any(|storages| {
            match utils::current_credential(storages.iter().copied(), now) {
                Some(current) => match &current.value {
                    StoredCredential::Otp { secret_key, .. } => {
                        totp(&self.settings, secret_key.as_bytes()).check(code, unix_seconds(now))
                    }
                    _ => false,
                },
                None => false,
            }
        }))
    }
}

#[async_trait]
impl CredentialHandler for TotpCredentialHandler {
    fn name(&self) -> &'static str {
        "totp"
    }

    fn supported_credentials(&self) -> &[CredentialKind] {
        &[CredentialKind::Totp]
    }

    async fn validate(
        &self,
        ctx: &HandlerContext<'_>,
        credentials: &mut Credentials,
    ) -> Result<(), CredentialProviderError> {
        let CredentialValue::Totp(value) = &credentials.value else {
            return Err(CredentialProviderError::UnsupportedCredential {
                handler: self.name(),
                kind: credentials.kind(),
            });
        };
        let username = value.username.clone();
        let code = value.token.clone();
        let device = value.device.clone();

        self.password.validate_password(ctx, credentials).await?;
        if !matches!(
            credentials.status,
            CredentialStatus::Valid | CredentialStatus::Expired
        ) {
            return Ok(());
        }

        let account = match &credentials.validated_account {
            Some(account) => Some(account.clone()),
            None => ctx.store.find_account_by_login_name(&username).await?,
        };
        let Some(account) = account else {
            credentials.invalidate();
            return Ok(());
        };

        if !self
            .check_code(ctx, &account, &code, device.as_deref())
            .await?
        {
            debug!("One-time code of account {} rejected", account.id);
            credentials.invalidate();
        }
        Ok(())
    }

    async fn update(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        credential: &CredentialUpdate,
        effective_date: Option<DateTime<Utc>>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<(), CredentialProviderError> {
        let CredentialUpdate::Totp {
            password,
            secret,
            device,
        } = credential
        else {
            return Err(CredentialProviderError::UnsupportedCredential {
                handler: self.name(),
                kind: credential.kind(),
            });
        };
        self.password
            .store_password(ctx, account, password, effective_date, expiry_date)
            .await?;
        ctx.store(
            account,
            StoredCredential::Otp {
                secret_key: secret.expose_secret().to_string(),
                device: device.clone(),
            },
            effective_date,
            expiry_date,
        )
        .await
    }
}
