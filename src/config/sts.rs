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

use chrono::TimeDelta;
use serde::Deserialize;

use crate::sts::constants::{DIGEST_SHA1, EXCLUSIVE_C14N, SIGNATURE_RSA_SHA1};

/// Security token service configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StsSection {
    /// Name of the STS, used as the issuer of the tokens.
    #[serde(default = "default_sts_name")]
    pub name: String,

    /// Lifetime (in seconds) applied to the issued tokens when the requester
    /// does not ask for one. `0` disables the default lifetime.
    #[serde(default = "default_token_timeout")]
    pub token_timeout: u64,

    /// Whether the issued and renewed tokens are signed with the STS key
    /// pair and whether the signature of the tokens is verified during
    /// renewal and validation.
    #[serde(default = "default_true")]
    pub sign_token: bool,

    /// Whether the issued and renewed tokens are encrypted for the service
    /// they apply to.
    #[serde(default)]
    pub encrypt_token: bool,

    /// Canonicalization method used when signing the tokens.
    #[serde(default = "default_canonicalization_method")]
    pub canonicalization_method: String,

    /// Signature method used when the request does not specify one.
    #[serde(default = "default_signature_method")]
    pub signature_method: String,

    /// Digest method of the token signature.
    #[serde(default = "default_digest_method")]
    pub digest_method: String,

    /// Name of the registered security token provider.
    #[serde(default)]
    pub token_provider: Option<String>,

    /// Name of the registered signature provider.
    #[serde(default)]
    pub signature_provider: Option<String>,

    /// Name of the registered encryption provider.
    #[serde(default)]
    pub encryption_provider: Option<String>,
}

impl StsSection {
    /// Default lifetime of the issued tokens.
    pub fn token_timeout(&self) -> TimeDelta {
        TimeDelta::try_seconds(i64::try_from(self.token_timeout).unwrap_or(i64::MAX))
            .unwrap_or(TimeDelta::MAX)
    }
}

impl Default for StsSection {
    fn default() -> Self {
        Self {
            name: default_sts_name(),
            token_timeout: default_token_timeout(),
            sign_token: true,
            encrypt_token: false,
            canonicalization_method: default_canonicalization_method(),
            signature_method: default_signature_method(),
            digest_method: default_digest_method(),
            token_provider: None,
            signature_provider: None,
            encryption_provider: None,
        }
    }
}

fn default_sts_name() -> String {
    "PicketLinkSTS".into()
}

fn default_token_timeout() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

fn default_canonicalization_method() -> String {
    EXCLUSIVE_C14N.into()
}

fn default_signature_method() -> String {
    SIGNATURE_RSA_SHA1.into()
}

fn default_digest_method() -> String {
    DIGEST_SHA1.into()
}
