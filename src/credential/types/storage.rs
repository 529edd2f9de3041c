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

//! Persisted credential values.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BuilderError;

/// Kind of a stored credential.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum StorageKind {
    EncodedPassword,
    Digest,
    X509Certificate,
    Otp,
    Token,
}

/// Stored credential value.
#[derive(Clone, Deserialize, PartialEq, Serialize)]
pub enum StoredCredential {
    /// Salted one way encoded password.
    EncodedPassword { salt: String, encoded_hash: String },
    /// HTTP digest HA1 of a realm.
    Digest { realm: String, ha1: Vec<u8> },
    /// Base64 encoded DER certificate.
    X509Certificate { base64_certificate: String },
    /// One-time password secret of a device.
    Otp {
        secret_key: String,
        device: Option<String>,
    },
    /// Opaque token of a given type.
    Token { token_type: String, value: String },
}

impl StoredCredential {
    pub fn kind(&self) -> StorageKind {
        match self {
            Self::EncodedPassword { .. } => StorageKind::EncodedPassword,
            Self::Digest { .. } => StorageKind::Digest,
            Self::X509Certificate { .. } => StorageKind::X509Certificate,
            Self::Otp { .. } => StorageKind::Otp,
            Self::Token { .. } => StorageKind::Token,
        }
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncodedPassword { .. } => f.debug_struct("EncodedPassword").finish_non_exhaustive(),
            Self::Digest { realm, .. } => f
                .debug_struct("Digest")
                .field("realm", realm)
                .finish_non_exhaustive(),
            Self::X509Certificate { base64_certificate } => f
                .debug_struct("X509Certificate")
                .field("base64_certificate", base64_certificate)
                .finish(),
            Self::Otp { device, .. } => f
                .debug_struct("Otp")
                .field("device", device)
                .finish_non_exhaustive(),
            Self::Token { token_type, .. } => f
                .debug_struct("Token")
                .field("token_type", token_type)
                .finish_non_exhaustive(),
        }
    }
}

/// One historical value of a credential of an account.
///
/// Records are never updated in place. A new value is stored as a new
/// record and the current one is selected by the effective date.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct CredentialStorage {
    /// Since when the credential is in effect. Not set means "now".
    #[builder(default)]
    pub effective_date: Option<DateTime<Utc>>,

    /// When the credential expires. Not set means "never".
    #[builder(default)]
    pub expiry_date: Option<DateTime<Utc>>,

    /// Stored value.
    pub value: StoredCredential,
}

impl CredentialStorage {
    pub fn builder() -> CredentialStorageBuilder {
        CredentialStorageBuilder::default()
    }

    pub fn kind(&self) -> StorageKind {
        self.value.kind()
    }
}
