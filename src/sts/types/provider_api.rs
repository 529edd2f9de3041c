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

use crate::sts::error::WsTrustError;
use crate::sts::types::{Principal, RequestSecurityToken, RequestSecurityTokenResponse};

pub trait StsApi: Send + Sync {
    /// Process the request according to its request type.
    ///
    /// Issued and renewed tokens are post processed (signed, encrypted)
    /// before the response is returned.
    fn handle(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

    /// Issue a new security token.
    fn issue(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

    /// Renew the token of the renew target.
    fn renew(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

    /// Validate the token of the validate target.
    ///
    /// An invalid token is reported through the status of the response.
    fn validate(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

    /// Cancel the token of the cancel target.
    fn cancel(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

    /// Sign and encrypt the token of an issue or renew response.
    fn post_process(
        &self,
        response: &mut RequestSecurityTokenResponse,
        request: &RequestSecurityToken,
    ) -> Result<(), WsTrustError>;
}
