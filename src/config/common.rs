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

//! Shared helpers of the configuration sections.
use chrono::TimeDelta;
use serde::{Deserialize, Deserializer};

/// Number of seconds as an optional `TimeDelta`.
pub fn optional_timedelta_from_seconds<'de, D>(
    deserializer: D,
) -> Result<Option<TimeDelta>, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds_opt: Option<i64> = Option::deserialize(deserializer)?;

    match seconds_opt {
        Some(seconds) => TimeDelta::try_seconds(seconds)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("TimeDelta overflow for optional seconds")),
        None => Ok(None),
    }
}

pub fn default_memory_driver() -> String {
    "memory".into()
}
