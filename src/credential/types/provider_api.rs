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

use crate::credential::error::CredentialProviderError;
use crate::credential::types::{
    Account, CredentialStorage, CredentialUpdate, Credentials, OpaqueToken, StorageKind,
};

#[async_trait]
pub trait CredentialApi: Send + Sync {
    /// Validate the credentials.
    ///
    /// The outcome is reported through the status of the credentials. An
    /// error is only returned when the credentials can not be processed at
    /// all (no handler, no token provider, store failure).
    async fn validate_credentials(
        &self,
        credentials: &mut Credentials,
    ) -> Result<(), CredentialProviderError>;

    /// Store a new credential value for the account.
    async fn update_credential(
        &self,
        account: &Account,
        credential: &CredentialUpdate,
        effective_date: Option<DateTime<Utc>>,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<(), CredentialProviderError>;

    /// Get the current stored credential of the account.
    async fn retrieve_current_credential(
        &self,
        account: &Account,
        kind: StorageKind,
    ) -> Result<Option<CredentialStorage>, CredentialProviderError>;

    /// Issue a token of the requested type for the account.
    async fn issue_token(
        &self,
        account: &Account,
        token_type: &str,
    ) -> Result<OpaqueToken, CredentialProviderError>;
}
