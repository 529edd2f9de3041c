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

use thiserror::Error;

use crate::credential::types::CredentialKind;
use crate::error::BuilderError;

#[derive(Error, Debug)]
pub enum CredentialProviderError {
    /// Unsupported driver.
    #[error("unsupported driver {0}")]
    UnsupportedDriver(String),

    /// No credential handler supports the credential kind for the store.
    #[error("no credential handler supports {kind} credentials with the {store} store")]
    NoHandler { kind: CredentialKind, store: String },

    /// No token provider supports the token.
    #[error("no token provider supports tokens of type {0}")]
    NoTokenProvider(String),

    /// Handler received a credential kind it does not process.
    #[error("{handler} credential handler does not support {kind} credentials")]
    UnsupportedCredential {
        handler: &'static str,
        kind: CredentialKind,
    },

    /// More than one account uses the same login name.
    #[error("multiple accounts found with the login name {0}")]
    MultipleAccounts(String),

    /// Account not found.
    #[error("account {0} not found")]
    AccountNotFound(String),

    /// Credential store failure.
    #[error("credential store error: {0}")]
    Store(String),

    /// Token provider failure.
    #[error("token provider error: {0}")]
    TokenProvider(String),

    #[error(transparent)]
    Builder {
        #[from]
        source: BuilderError,
    },

    #[error("password hashing error")]
    PasswordHash {
        #[from]
        source: PasswordHashError,
    },

    #[error(transparent)]
    Validation {
        #[from]
        source: validator::ValidationErrors,
    },
}

#[derive(Error, Debug)]
pub enum PasswordHashError {
    /// Bcrypt error.
    #[error(transparent)]
    BCrypt {
        #[from]
        source: bcrypt::BcryptError,
    },

    /// Async task join error.
    #[error(transparent)]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },

    /// The secure random generator can not be created. Salts are never
    /// produced by a weaker generator.
    #[error("secure random generator can not be initialized: {0}")]
    SecureRandom(String),

    /// Lock guarding the secure random generator is poisoned.
    #[error("secure random generator lock is poisoned")]
    Poisoned,
}
