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
use mockall::mock;

use crate::config::Config;
use crate::credential::CredentialApi;
use crate::credential::backend::CredentialStore;
use crate::credential::error::CredentialProviderError;
use crate::credential::types::{
    Account, CredentialStorage, CredentialUpdate, Credentials, OpaqueToken, StorageKind,
};
use crate::plugin_manager::PluginManager;

mock! {
    pub CredentialProvider {
        pub fn new(cfg: &Config, plugin_manager: &PluginManager) -> Result<Self, CredentialProviderError>;
    }

    #[async_trait]
    impl CredentialApi for CredentialProvider {
        async fn validate_credentials(
            &self,
            credentials: &mut Credentials,
        ) -> Result<(), CredentialProviderError>;

        async fn update_credential(
            &self,
            account: &Account,
            credential: &CredentialUpdate,
            effective_date: Option<DateTime<Utc>>,
            expiry_date: Option<DateTime<Utc>>,
        ) -> Result<(), CredentialProviderError>;

        async fn retrieve_current_credential(
            &self,
            account: &Account,
            kind: StorageKind,
        ) -> Result<Option<CredentialStorage>, CredentialProviderError>;

        async fn issue_token(
            &self,
            account: &Account,
            token_type: &str,
        ) -> Result<OpaqueToken, CredentialProviderError>;
    }

    impl Clone for CredentialProvider {
        fn clone(&self) -> Self;
    }
}

mock! {
    pub CredentialStore {}

    #[async_trait]
    impl CredentialStore for CredentialStore {
        fn store_type(&self) -> &'static str;

        async fn find_account_by_login_name(
            &self,
            login_name: &str,
        ) -> Result<Option<Account>, CredentialProviderError>;

        async fn find_account_by_id(
            &self,
            account_id: &str,
        ) -> Result<Option<Account>, CredentialProviderError>;

        async fn retrieve_credentials(
            &self,
            account: &Account,
            kind: StorageKind,
        ) -> Result<Vec<CredentialStorage>, CredentialProviderError>;

        async fn store_credential(
            &self,
            account: &Account,
            storage: CredentialStorage,
        ) -> Result<(), CredentialProviderError>;
    }

    impl Clone for CredentialStore {
        fn clone(&self) -> Self;
    }
}

impl std::fmt::Debug for MockCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCredentialStore").finish()
    }
}
