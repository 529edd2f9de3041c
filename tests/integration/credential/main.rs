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
//

use eyre::Report;

use sts_core::config::Config;
use sts_core::credential::CredentialProvider;
use sts_core::credential::backend::memory::MemoryCredentialStore;
use sts_core::credential::types::Account;
use sts_core::plugin_manager::PluginManager;

mod digest;
mod token;
mod totp;

/// Credential provider backed by an in-memory store with the account
/// `john`. The store is returned to let the tests manipulate the account.
fn setup(
    config: &Config,
    mut plugin_manager: PluginManager,
) -> Result<(CredentialProvider, MemoryCredentialStore, Account), Report> {
    let store = MemoryCredentialStore::default();
    let john = Account::builder()
        .id("8d2a5c3f")
        .login_name("john")
        .build()?;
    store.add_account(john.clone())?;
    plugin_manager.register_credential_store("memory", Box::new(store.clone()));
    let provider = CredentialProvider::new(config, &plugin_manager)?;
    Ok((provider, store, john))
}
