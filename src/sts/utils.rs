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

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::sts::types::{AppliesTo, AppliesToContent, Lifetime, OnBehalfOf, Principal};

/// Name of the service the token applies to: the address of the first
/// endpoint reference.
pub fn parse_applies_to(applies_to: &AppliesTo) -> Option<&str> {
    applies_to.any.iter().find_map(|content| match content {
        AppliesToContent::EndpointReference { address } => address.as_deref(),
        AppliesToContent::Other(_) => None,
    })
}

/// Principal the token is requested on behalf of. Only `UsernameToken` is
/// understood.
pub fn on_behalf_of_principal(on_behalf_of: &OnBehalfOf) -> Option<Principal> {
    match on_behalf_of {
        OnBehalfOf::UsernameToken { username, .. } => Some(Principal::from(username.as_str())),
        OnBehalfOf::Other(name) => {
            debug!("Unsupported OnBehalfOf content {name}");
            None
        }
    }
}

/// Lifetime starting now and lasting the timeout.
pub fn create_default_lifetime(now: DateTime<Utc>, timeout: TimeDelta) -> Lifetime {
    Lifetime {
        created: now,
        expires: now.checked_add_signed(timeout).unwrap_or(DateTime::<Utc>::MAX_UTC),
    }
}
