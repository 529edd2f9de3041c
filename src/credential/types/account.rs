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

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::BuilderError;

/// Identity (user or agent) owning credentials.
///
/// Accounts are managed outside of this crate, credential handlers only look
/// them up by the login name or the ID.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize, Validate)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Account {
    /// The account ID.
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    /// The login name. Must be unique within the credential store.
    #[validate(length(min = 1, max = 255))]
    pub login_name: String,

    /// If the account is enabled, this value is true. Credentials of a
    /// disabled account are never validated.
    #[builder(default = "true")]
    pub enabled: bool,
}

impl Account {
    pub fn builder() -> AccountBuilder {
        AccountBuilder::default()
    }
}
