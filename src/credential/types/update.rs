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

use secrecy::SecretString;

use crate::credential::types::{CredentialKind, OpaqueToken};

/// New credential value of an account.
#[derive(Clone, Debug)]
pub enum CredentialUpdate {
    /// New password.
    Password(SecretString),
    /// New password of a digest realm. Only the HA1 is persisted.
    Digest {
        realm: String,
        password: SecretString,
    },
    /// New DER encoded client certificate.
    X509Certificate(Vec<u8>),
    /// New password together with the one-time password secret of a device.
    Totp {
        password: SecretString,
        secret: SecretString,
        device: Option<String>,
    },
    /// Token issued to the account.
    Token(OpaqueToken),
}

impl CredentialUpdate {
    pub fn kind(&self) -> CredentialKind {
        match self {
            Self::Password(_) => CredentialKind::Password,
            Self::Digest { .. } => CredentialKind::Digest,
            Self::X509Certificate(_) => CredentialKind::X509Certificate,
            Self::Totp { .. } => CredentialKind::Totp,
            Self::Token(_) => CredentialKind::Token,
        }
    }
}
