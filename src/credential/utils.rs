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

//! Validity window helpers of the stored credentials.

use chrono::{DateTime, Utc};

use crate::credential::types::CredentialStorage;

/// Whether the stored credential has expired at `now`.
pub fn is_credential_expired(storage: &CredentialStorage, now: DateTime<Utc>) -> bool {
    storage.expiry_date.is_some_and(|expiry| expiry <= now)
}

/// Whether the stored credential is in effect at `now`: effective in the
/// past (or without an effective date) and not expired.
pub fn is_current_credential(storage: &CredentialStorage, now: DateTime<Utc>) -> bool {
    storage.effective_date.is_none_or(|effective| effective <= now)
        && !is_credential_expired(storage, now)
}

/// Select the current credential among the stored ones.
///
/// The credential with the latest effective date not in the future wins.
/// A record without an effective date is treated as effective now.
pub fn current_credential<'a, I>(storages: I, now: DateTime<Utc>) -> Option<&'a CredentialStorage>
where
    I: IntoIterator<Item = &'a CredentialStorage>,
{
    storages
        .into_iter()
        .filter(|storage| is_current_credential(storage, now))
        .max_by_key(|storage| storage.effective_date.unwrap_or(now))
}

/// Select the latest stored credential already in effect, expired or not.
///
/// Validation uses this selection so that a matching but expired credential
/// is reported as expired instead of unknown.
pub fn latest_effective_credential<'a, I>(
    storages: I,
    now: DateTime<Utc>,
) -> Option<&'a CredentialStorage>
where
    I: IntoIterator<Item = &'a CredentialStorage>,
{
    storages
        .into_iter()
        .filter(|storage| storage.effective_date.is_none_or(|effective| effective <= now))
        .max_by_key(|storage| storage.effective_date.unwrap_or(now))
}
