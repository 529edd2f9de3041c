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

//! # Provider manager
//!
//! Provider manager provides access to the credential provider and the STS.
//! The hosting service builds it once during the start and passes it down to
//! the protocol layer. Tests swap the providers for their mocks.
use derive_builder::Builder;
use mockall_double::double;

use crate::config::Config;
use crate::credential::CredentialApi;
#[double]
use crate::credential::CredentialProvider;
use crate::error::StsCoreError;
use crate::plugin_manager::PluginManager;
use crate::sts::StsApi;
#[double]
use crate::sts::StsProvider;

/// Global provider manager.
#[derive(Builder, Clone)]
// It is necessary to use the owned pattern since otherwise builder invokes clone which immediately
// confuses mockall used in tests
#[builder(pattern = "owned")]
pub struct Provider {
    /// Configuration.
    pub config: Config,
    /// Credential provider.
    credential: CredentialProvider,
    /// Security token service.
    sts: StsProvider,
}

impl Provider {
    pub fn new(cfg: Config, plugin_manager: PluginManager) -> Result<Self, StsCoreError> {
        let credential_provider = CredentialProvider::new(&cfg, &plugin_manager)?;
        let sts_provider = StsProvider::new(&cfg, &plugin_manager)?;

        Ok(Self {
            config: cfg,
            credential: credential_provider,
            sts: sts_provider,
        })
    }

    /// Get the credential provider.
    pub fn get_credential_provider(&self) -> &impl CredentialApi {
        &self.credential
    }

    /// Get the security token service.
    pub fn get_sts_provider(&self) -> &impl StsApi {
        &self.sts
    }
}

#[cfg(test)]
impl Provider {
    pub fn mocked_builder() -> ProviderBuilder {
        let config = Config::default();
        let credential_mock = crate::credential::MockCredentialProvider::default();
        let sts_mock = crate::sts::MockStsProvider::default();

        ProviderBuilder::default()
            .config(config.clone())
            .credential(credential_mock)
            .sts(sts_mock)
    }
}
