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

//! Credential handlers.
//!
//! A handler validates and updates the credentials of one or more kinds. The
//! handler is selected by the kind of the credential together with the type
//! of the credential store. Handlers registered through the plugin manager
//! take precedence over the built-in ones.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::clock::Clock;
use crate::credential::backend::CredentialStore;
use crate::credential::error::CredentialProviderError;
use crate::credential::types::{
    Account, CredentialKind, CredentialStatus, CredentialStorage, CredentialUpdate, Credentials,
    StorageKind, StoredCredential,
};
use crate::credential::utils;

pub mod digest;
pub mod password;
pub mod token;
pub mod totp;
pub mod x509;

/// Collaborators available to a handler while processing a request.
#[derive(Clone, Copy)]
pub struct HandlerContext<'a> {
    pub store: &'a dyn CredentialStore,
    pub clock: &'a dyn Clock,
}

impl<'a> HandlerContext<'a> {
    pub fn new(store: &'a dyn CredentialStore, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Latest stored credential of the kind already in effect, expired or
    /// not.
    pub async fn effective_credential(
        &self,
        account: &Account,
        kind: StorageKind,
    ) -> Result<Option<CredentialStorage>, CredentialProviderError> {
        let storages = self.store.retrieve_credentials(account, kind).await?;
        Ok(utils::latest_effective_credential(&storages, self.now()).cloned())
    }

    /// Persist a new stored credential. The effective date defaults to now.
    pub async fn store(
        &self,
        account: &Account,
        value: StoredCredential,
        effective_date: Option<DateTime<Utc>>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<(), CredentialProviderError> {
        let storage = CredentialStorage {
            effective_date: Some(effective_date.unwrap_or_else(|| self.now())),
            expiry_date,
            value,
        };
        debug!("Storing {:?} credential of account {}", storage.kind(), account.id);
        self.store.store_credential(account, storage).await
    }
}

#[async_trait]
pub trait CredentialHandler: Send + Sync + std::fmt::Debug {
    /// Handler name.
    fn name(&self) -> &'static str;

    /// Credential kinds processed by the handler.
    fn supported_credentials(&self) -> &[CredentialKind];

    /// Whether the handler can work with the credential store type.
    fn supports_store(&self, _store_type: &str) -> bool {
        true
    }

    fn supports(&self, kind: CredentialKind, store_type: &str) -> bool {
        self.supported_credentials().contains(&kind) && self.supports_store(store_type)
    }

    /// Validate the credentials setting their status.
    async fn validate(
        &self,
        ctx: &HandlerContext<'_>,
        credentials: &mut Credentials,
    ) -> Result<(), CredentialProviderError>;

    /// Store the new credential value of the account.
    async fn update(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        credential: &CredentialUpdate,
        effective_date: Option<DateTime<Utc>>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<(), CredentialProviderError>;
}

/// Ordered list of the handlers. Registered handlers are consulted before
/// the defaults.
#[derive(Clone, Debug, Default)]
pub struct CredentialHandlerRegistry {
    registered: Vec<Arc<dyn CredentialHandler>>,
    defaults: Vec<Arc<dyn CredentialHandler>>,
}

impl CredentialHandlerRegistry {
    pub fn with_defaults(defaults: Vec<Arc<dyn CredentialHandler>>) -> Self {
        Self {
            registered: Vec::new(),
            defaults,
        }
    }

    pub fn register(&mut self, handler: Arc<dyn CredentialHandler>) {
        self.registered.push(handler);
    }

    /// Find the handler of the credential kind for the store type.
    pub fn lookup(
        &self,
        kind: CredentialKind,
        store_type: &str,
    ) -> Option<&Arc<dyn CredentialHandler>> {
        self.registered
            .iter()
            .chain(self.defaults.iter())
            .find(|handler| handler.supports(kind, store_type))
    }
}

/// How the account owning the presented credentials is resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum AccountLookup {
    LoginName(String),
    Id(String),
}

/// Per kind part of the credential validation.
#[async_trait]
pub trait CredentialMatcher: Send + Sync {
    /// Stored credential the presented value is compared with.
    async fn credential_storage(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        credentials: &Credentials,
    ) -> Result<Option<CredentialStorage>, CredentialProviderError>;

    /// Compare the presented value with the stored one.
    async fn matches(
        &self,
        ctx: &HandlerContext<'_>,
        account: &Account,
        storage: Option<&CredentialStorage>,
        credentials: &Credentials,
    ) -> Result<bool, CredentialProviderError>;
}

/// Shared validation flow of the handlers.
///
/// Unknown accounts and mismatching values end up `Invalid`, a disabled
/// account is reported without ever consulting the stored credentials. The
/// validated account is only attached to `Valid` credentials.
pub async fn validate_credentials<M>(
    ctx: &HandlerContext<'_>,
    credentials: &mut Credentials,
    lookup: AccountLookup,
    matcher: &M,
) -> Result<(), CredentialProviderError>
where
    M: CredentialMatcher + ?Sized,
{
    credentials.status = CredentialStatus::InProgress;
    credentials.validated_account = None;

    let account = match &lookup {
        AccountLookup::LoginName(login_name) => {
            ctx.store.find_account_by_login_name(login_name).await?
        }
        AccountLookup::Id(id) => ctx.store.find_account_by_id(id).await?,
    };

    let Some(account) = account else {
        debug!("Account {:?} not found", lookup);
        credentials.invalidate();
        return Ok(());
    };

    if !account.enabled {
        debug!("Account {} is disabled", account.id);
        credentials.status = CredentialStatus::AccountDisabled;
        return Ok(());
    }

    let storage = matcher
        .credential_storage(ctx, &account, credentials)
        .await?;
    if matcher
        .matches(ctx, &account, storage.as_ref(), credentials)
        .await?
    {
        if storage
            .as_ref()
            .is_some_and(|storage| utils::is_credential_expired(storage, ctx.now()))
        {
            credentials.status = CredentialStatus::Expired;
        } else {
            credentials.status = CredentialStatus::Valid;
            credentials.validated_account = Some(account);
        }
    } else {
        credentials.invalidate();
    }
    Ok(())
}
