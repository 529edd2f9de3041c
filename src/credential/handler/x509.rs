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
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;

use crate::credential::error::CredentialProviderError;
use crate::credential::handler::{
    AccountLookup, CredentialHandler, CredentialMatcher, HandlerContext, validate_credentials,
};
use crate::credential::types::{
    Account, CredentialKind, CredentialStorage, CredentialUpdate, CredentialValue, Credentials,
    StorageKind, StoredCredential,
};

/// Client certificate handler.
///
/// A certificate already verified by a trusted party is accepted for any
/// enabled account, otherwise it must equal the stored one.
#[derive(Clone, Debug, Default)]
pub struct X509CertificateCredentialHandler;

#[async_trait]
impl CredentialMatcher for X509CertificateCredentialHandler {
    async fn credential_storage(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        credentials: &Credentials,
    ) -> Result<Option<CredentialStorage>, CredentialProviderError> {
        match &credentials.value {
            CredentialValue::X509Certificate(value) if !value.trusted => {
                ctx.effective_credential(account, StorageKind::X509Certificate)
                    .await
            }
            _ => Ok(None),
        }
    }

    async fn matches(
        &self,
        _ctx: &HandlerContext<'_>,
        _account: &Account,
        storage: Option<&CredentialStorage>,
        credentials: &Credentials,
    ) -> Result<bool, CredentialProviderError> {
        let CredentialValue::X509Certificate(value) = &credentials.value else {
            return Ok(false);
        };
        if value.trusted {
            return Ok(true);
        }
        let Some(CredentialStorage {
            value: StoredCredential::X509Certificate { base64_certificate },
            ..
        }) = storage
        else {
            return Ok(false);
        };
        let presented = STANDARD.encode(&value.certificate);
        Ok(presented
            .as_bytes()
            .ct_eq(base64_certificate.as_bytes())
            .into())
    }
}

#[async_trait]
impl CredentialHandler for X509CertificateCredentialHandler {
    fn name(&self) -> &'static str {
        "x509"
    }

    fn supported_credentials(&self) -> &[CredentialKind] {
        &[CredentialKind::X509Certificate]
    }

    async fn validate(
        &self,
        ctx: &HandlerContext<'_>,
        credentials: &mut Credentials,
    ) -> Result<(), CredentialProviderError> {
        let CredentialValue::X509Certificate(value) = &credentials.value else {
            return Err(CredentialProviderError::UnsupportedCredential {
                handler: self.name(),
                kind: credentials.kind(),
            });
        };
        let lookup = AccountLookup::LoginName(value.username.clone());
        validate_credentials(ctx, credentials, lookup, self).await
    }

    async fn update(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        credential: &CredentialUpdate,
        effective_date: Option<DateTime<Utc>>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<(), CredentialProviderError> {
        let CredentialUpdate::X509Certificate(certificate) = credential else {
            return Err(CredentialProviderError::UnsupportedCredential {
                handler: self.name(),
                kind: credential.kind(),
            });
        };
        ctx.store(
            account,
            StoredCredential::X509Certificate {
                base64_certificate: STANDARD.encode(certificate),
            },
            effective_date,
            expiry_date,
        )
        .await
    }
}
