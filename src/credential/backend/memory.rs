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

//! In-memory credential store.
//!
//! Clones share the same state, so an instance registered in the plugin
//! manager can still be populated by the hosting service.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;
use validator::Validate;

use crate::credential::backend::CredentialStore;
use crate::credential::error::CredentialProviderError;
use crate::credential::types::{Account, CredentialStorage, StorageKind};

#[derive(Debug, Default)]
struct MemoryState {
    accounts: HashMap<String, Account>,
    credentials: HashMap<(String, StorageKind), Vec<CredentialStorage>>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryCredentialStore {
    state: Arc<RwLock<MemoryState>>,
}

fn poisoned<T>(_: T) -> CredentialProviderError {
    CredentialProviderError::Store("memory store lock is poisoned".into())
}

impl MemoryCredentialStore {
    /// Add an account.
    pub fn add_account(&self, account: Account) -> Result<(), CredentialProviderError> {
        account.validate()?;
        let mut state = self.state.write().map_err(poisoned)?;
        if state
            .accounts
            .values()
            .any(|existing| existing.login_name == account.login_name && existing.id != account.id)
        {
            return Err(CredentialProviderError::MultipleAccounts(account.login_name));
        }
        debug!("Adding account {}", account.id);
        state.accounts.insert(account.id.clone(), account);
        Ok(())
    }

    /// Enable or disable the account.
    pub fn set_account_enabled(
        &self,
        account_id: &str,
        enabled: bool,
    ) -> Result<(), CredentialProviderError> {
        let mut state = self.state.write().map_err(poisoned)?;
        let account = state
            .accounts
            .get_mut(account_id)
            .ok_or_else(|| CredentialProviderError::AccountNotFound(account_id.to_string()))?;
        account.enabled = enabled;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    fn store_type(&self) -> &'static str {
        "memory"
    }

    async fn find_account_by_login_name(
        &self,
        login_name: &str,
    ) -> Result<Option<Account>, CredentialProviderError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .accounts
            .values()
            .find(|account| account.login_name == login_name)
            .cloned())
    }

    async fn find_account_by_id(
        &self,
        account_id: &str,
    ) -> Result<Option<Account>, CredentialProviderError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.accounts.get(account_id).cloned())
    }

    async fn retrieve_credentials(
        &self,
        account: &Account,
        kind: StorageKind,
    ) -> Result<Vec<CredentialStorage>, CredentialProviderError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .credentials
            .get(&(account.id.clone(), kind))
            .cloned()
            .unwrap_or_default())
    }

    async fn store_credential(
        &self,
        account: &Account,
        storage: CredentialStorage,
    ) -> Result<(), CredentialProviderError> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.accounts.contains_key(&account.id) {
            return Err(CredentialProviderError::AccountNotFound(account.id.clone()));
        }
        state
            .credentials
            .entry((account.id.clone(), storage.kind()))
            .or_default()
            .push(storage);
        Ok(())
    }
}
