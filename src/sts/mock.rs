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

use mockall::mock;

use crate::config::Config;
use crate::plugin_manager::PluginManager;
use crate::sts::StsApi;
use crate::sts::error::WsTrustError;
use crate::sts::types::{Principal, RequestSecurityToken, RequestSecurityTokenResponse};

mock! {
    pub StsProvider {
        pub fn new(cfg: &Config, plugin_manager: &PluginManager) -> Result<Self, WsTrustError>;
    }

    impl StsApi for StsProvider {
        fn handle(
            &self,
            request: &RequestSecurityToken,
            caller: &Principal,
        ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

        fn issue(
            &self,
            request: &RequestSecurityToken,
            caller: &Principal,
        ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

        fn renew(
            &self,
            request: &RequestSecurityToken,
            caller: &Principal,
        ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

        fn validate(
            &self,
            request: &RequestSecurityToken,
            caller: &Principal,
        ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

        fn cancel(
            &self,
            request: &RequestSecurityToken,
            caller: &Principal,
        ) -> Result<RequestSecurityTokenResponse, WsTrustError>;

        fn post_process(
            &self,
            response: &mut RequestSecurityTokenResponse,
            request: &RequestSecurityToken,
        ) -> Result<(), WsTrustError>;
    }

    impl Clone for StsProvider {
        fn clone(&self) -> Self;
    }
}
