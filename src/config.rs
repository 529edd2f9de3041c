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

use config::{File, FileFormat};
use eyre::{Report, WrapErr};
use serde::Deserialize;
use std::path::PathBuf;
use validator::Validate;

pub mod common;
mod credential;
mod sts;
mod totp;

pub use credential::*;
pub use sts::*;
pub use totp::*;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    /// Credential handling configuration.
    #[serde(default)]
    pub credential: CredentialSection,

    /// Security token service configuration.
    #[serde(default)]
    pub sts: StsSection,

    /// Time based one-time password parameters.
    #[serde(default)]
    pub totp: TotpSection,
}

impl Config {
    pub fn new(path: PathBuf) -> Result<Self, Report> {
        let mut builder = config::Config::builder();

        if std::path::Path::new(&path).is_file() {
            builder = builder.add_source(File::from(path).format(FileFormat::Ini));
        }

        builder.try_into()
    }
}

impl TryFrom<config::ConfigBuilder<config::builder::DefaultState>> for Config {
    type Error = Report;
    fn try_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Self::Error> {
        let mut builder = builder;
        builder = builder
            .set_default("credential.driver", "memory")?
            .set_default("credential.max_password_length", "4096")?
            .set_default("sts.name", "PicketLinkSTS")?
            .set_default("sts.token_timeout", "3600")?
            .set_default("sts.sign_token", "true")?
            .set_default("sts.encrypt_token", "false")?
            .set_default("totp.digits", "6")?
            .set_default("totp.interval_seconds", "30")?
            .set_default("totp.delay_window", "1")?;

        let config: Self = builder
            .build()
            .wrap_err("Failed to read configuration file")?
            .try_deserialize()
            .wrap_err("Failed to parse configuration file")?;
        config
            .totp
            .validate()
            .wrap_err("Invalid totp configuration")?;
        Ok(config)
    }
}
