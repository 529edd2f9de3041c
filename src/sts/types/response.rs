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

use crate::sts::constants::{STATUS_CODE_INVALID, STATUS_CODE_VALID};
use crate::sts::types::{
    AppliesTo, Entropy, Lifetime, RequestedProofToken, TokenElement, TokenReference,
};

/// Outcome of a token validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub code: String,
    pub reason: String,
}

impl Status {
    pub fn valid<S: Into<String>>(reason: S) -> Self {
        Self {
            code: STATUS_CODE_VALID.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid<S: Into<String>>(reason: S) -> Self {
        Self {
            code: STATUS_CODE_INVALID.into(),
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.code == STATUS_CODE_VALID
    }
}

/// `RequestSecurityTokenResponse` message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestSecurityTokenResponse {
    pub context: Option<String>,
    pub token_type: Option<String>,
    pub lifetime: Option<Lifetime>,
    pub applies_to: Option<AppliesTo>,
    pub key_size: Option<u32>,
    pub key_type: Option<String>,
    pub requested_security_token: Option<TokenElement>,
    pub requested_proof_token: Option<RequestedProofToken>,
    /// Entropy contributed by the STS.
    pub entropy: Option<Entropy>,
    pub requested_attached_reference: Option<TokenReference>,
    pub requested_unattached_reference: Option<TokenReference>,
    pub status: Option<Status>,
    pub requested_token_cancelled: bool,
}
