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

use serde::Deserialize;
use validator::Validate;

/// Time based one-time password parameters.
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct TotpSection {
    /// HMAC algorithm.
    #[serde(default)]
    pub algorithm: TotpAlgorithm,

    /// Number of digits of a code.
    #[serde(default = "default_digits")]
    #[validate(range(min = 6, max = 8))]
    pub digits: usize,

    /// Duration of a time step in seconds.
    #[serde(default = "default_interval_seconds")]
    #[validate(range(min = 1))]
    pub interval_seconds: u64,

    /// Number of time steps before and after the current one in which a
    /// code is still accepted.
    #[serde(default = "default_delay_window")]
    pub delay_window: u8,
}

impl Default for TotpSection {
    fn default() -> Self {
        Self {
            algorithm: TotpAlgorithm::default(),
            digits: default_digits(),
            interval_seconds: default_interval_seconds(),
            delay_window: default_delay_window(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub enum TotpAlgorithm {
    #[default]
    #[serde(rename = "sha1")]
    Sha1,
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha512")]
    Sha512,
}

fn default_digits() -> usize {
    6
}

fn default_interval_seconds() -> u64 {
    30
}

fn default_delay_window() -> u8 {
    1
}
