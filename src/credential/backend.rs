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
use dyn_clone::DynClone;

use crate::credential::error::CredentialProviderError;
use crate::credential::types::{Account, CredentialStorage, StorageKind};
use crate::credential::utils;

pub mod memory;

/// Persistence of the accounts and their stored credentials.
#[async_trait]
pub trait CredentialStore: DynClone + Send + Sync + std::fmt::Debug {
    /// Name of the store type. Credential handlers may restrict themselves to
    /// certain store types.
    fn store_type(&self) -> &'static str;

    /// Find account by the login name.
    async fn find_account_by_login_name(
        &self,
        login_name: &str,
    ) -> Result<Option<Account>, CredentialProviderError>;

    /// Find account by the ID.
    async fn find_account_by_id(
        &self,
        account_id: &str,
    ) -> Result<Option<Account>, CredentialProviderError>;

    /// List all the stored credentials of a kind for the account.
    async fn retrieve_credentials(
        &self,
        account: &Account,
        kind: StorageKind,
    ) -> Result<Vec<CredentialStorage>, CredentialProviderError>;

    /// Get the stored credential of a kind currently in effect for the
    /// account.
    async fn retrieve_current_credential(
        &self,
        account: &Account,
        kind: StorageKind,
        now: DateTime<Utc>,
    ) -> Result<Option<CredentialStorage>, CredentialProviderError> {
        let storages = self.retrieve_credentials(account, kind).await?;
        Ok(utils::current_credential(&storages, now).cloned())
    }

    /// Persist a new stored credential for the account.
    async fn store_credential(
        &self,
        account: &Account,
        storage: CredentialStorage,
    ) -> Result<(), CredentialProviderError>;
}

dyn_clone::clone_trait_object!(CredentialStore);
