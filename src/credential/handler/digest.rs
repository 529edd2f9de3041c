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

use crate::credential::digest;
use crate::credential::error::CredentialProviderError;
use crate::credential::handler::{
    AccountLookup, CredentialHandler, CredentialMatcher, HandlerContext, validate_credentials,
};
use crate::credential::types::{
    Account, CredentialKind, CredentialStorage, CredentialUpdate, CredentialValue, Credentials,
    StorageKind, StoredCredential,
};
use crate::credential::utils;

/// HTTP digest handler. Only the HA1 of every realm is stored.
#[derive(Clone, Debug, Default)]
pub struct DigestCredentialHandler;

#[async_trait]
impl CredentialMatcher for DigestCredentialHandler {
    async fn credential_storage(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        credentials: &Credentials,
    ) -> Result<Option<CredentialStorage>, CredentialProviderError> {
        let CredentialValue::Digest(value) = &credentials.value else {
            return Ok(None);
        };
        let storages = ctx
            .store
            .retrieve_credentials(account, StorageKind::Digest)
            .await?;
        Ok(utils::latest_effective_credential(
            storages.iter().filter(|storage| {
                matches!(&storage.value, StoredCredential::Digest { realm, .. } if *realm == value.realm)
            }),
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
            CredentialValue::Digest(value),
            Some(CredentialStorage {
                value: StoredCredential::Digest { ha1, .. },
                ..
            }),
        ) = (&credentials.value, storage)
        else {
            return Ok(false);
        };
        let expected = digest::expected_response(value, ha1)
            .unwrap_or_else(|| digest::simple_digest(ha1));
        Ok(digest::digest_matches(&expected, &value.digest))
    }
}

#[async_trait]
impl CredentialHandler for DigestCredentialHandler {
    fn name(&self) -> &'static str {
        "digest"
    }

    fn supported_credentials(&self) -> &[CredentialKind] {
        &[CredentialKind::Digest]
    }

    async fn validate(
        &self,
        ctx: &HandlerContext<'_>,
        credentials: &mut Credentials,
    ) -> Result<(), CredentialProviderError> {
        let CredentialValue::Digest(value) = &credentials.value else {
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
        let CredentialUpdate::Digest { realm, password } = credential else {
            return Err(CredentialProviderError::UnsupportedCredential {
                handler: self.name(),
                kind: credential.kind(),
            });
        };
        let ha1 = digest::hash_a1(&account.login_name, realm, password);
        ctx.store(
            account,
            StoredCredential::Digest {
                realm: realm.clone(),
                ha1,
            },
            effective_date,
            expiry_date,
        )
        .await
    }
}
