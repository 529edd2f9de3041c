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

use crate::config::common::{default_memory_driver, optional_timedelta_from_seconds};

/// Credential handling configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct CredentialSection {
    /// Credential store driver.
    #[serde(default = "default_memory_driver")]
    pub driver: String,

    /// Maximal password length. Longer passwords are truncated before
    /// hashing.
    #[serde(default = "default_max_password_length")]
    pub max_password_length: usize,

    /// Password encoder used for the password based credentials: `sha512`,
    /// `bcrypt` or the name of an encoder registered in the plugin manager.
    #[serde(default = "default_password_encoder")]
    pub password_encoder: String,

    /// Password encoder strength. Number of hashing iterations for the
    /// `sha512` encoder and the cost for `bcrypt`.
    #[serde(default)]
    pub password_hash_strength: Option<u32>,

    /// Algorithm of the secure random generator producing the password
    /// salts.
    #[serde(default)]
    pub secure_random_algorithm: SecureRandomAlgo,

    /// Interval (in seconds) after which the secure random generator is
    /// re-seeded. Not set means the generator is never renewed.
    #[serde(default, deserialize_with = "optional_timedelta_from_seconds")]
    pub secure_random_renewal_interval: Option<TimeDelta>,
}

impl Default for CredentialSection {
    fn default() -> Self {
        Self {
            driver: default_memory_driver(),
            max_password_length: default_max_password_length(),
            password_encoder: default_password_encoder(),
            password_hash_strength: None,
            secure_random_algorithm: SecureRandomAlgo::default(),
            secure_random_renewal_interval: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
pub enum SecureRandomAlgo {
    /// Standard cryptographically secure generator seeded from the OS.
    #[default]
    #[serde(rename = "std")]
    Std,
}

fn default_password_encoder() -> String {
    "sha512".into()
}

fn default_max_password_length() -> usize {
    4096
}
