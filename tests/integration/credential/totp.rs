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

use chrono::{TimeDelta, Utc};
use eyre::Report;
use secrecy::SecretString;

use sts_core::config::Config;
use sts_core::credential::CredentialApi;
use sts_core::credential::handler::totp::one_time_code;
use sts_core::credential::types::{
    CredentialStatus, CredentialUpdate, Credentials, TotpCredentials,
};
use sts_core::plugin_manager::PluginManager;

use super::setup;

fn totp(password: &str, token: String, device: Option<&str>) -> Credentials {
    TotpCredentials {
        username: "john".into(),
        password: password.into(),
        token,
        device: device.map(Into::into),
    }
    .into()
}

#[tokio::test]
async fn test_totp_devices() -> Result<(), Report> {
    let config = Config::default();
    let (provider, _, john) = setup(&config, PluginManager::default())?;
    let phone = SecretString::from("phone secret 0123456789");
    let tablet = SecretString::from("tablet secret 0123456789");
    for (secret, device) in [(&phone, "phone"), (&tablet, "tablet")] {
        provider
            .update_credential(
                &john,
                &CredentialUpdate::Totp {
                    password: "s3cr3t".into(),
                    secret: secret.clone(),
                    device: Some(device.into()),
                },
                None,
                None,
            )
            .await?;
    }

    let phone_code = one_time_code(&config.totp, &phone, Utc::now());

    let mut credentials = totp("s3cr3t", phone_code.clone(), Some("phone"));
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Valid, credentials.status);
    assert_eq!(Some(john.clone()), credentials.validated_account);

    // any device
    let mut credentials = totp("s3cr3t", phone_code.clone(), None);
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Valid, credentials.status);

    // code of another device
    let mut credentials = totp("s3cr3t", phone_code.clone(), Some("tablet"));
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Invalid, credentials.status);
    assert!(credentials.validated_account.is_none());

    let mut credentials = totp("wrong", phone_code, Some("phone"));
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Invalid, credentials.status);
    Ok(())
}

#[tokio::test]
async fn test_totp_outdated_code() -> Result<(), Report> {
    let config = Config::default();
    let (provider, _, john) = setup(&config, PluginManager::default())?;
    let secret = SecretString::from("phone secret 0123456789");
    provider
        .update_credential(
            &john,
            &CredentialUpdate::Totp {
                password: "s3cr3t".into(),
                secret: secret.clone(),
                device: None,
            },
            None,
            None,
        )
        .await?;

    let outdated = one_time_code(&config.totp, &secret, Utc::now() - TimeDelta::minutes(10));
    let current = one_time_code(&config.totp, &secret, Utc::now());
    if outdated != current {
        let mut credentials = totp("s3cr3t", outdated, None);
        provider.validate_credentials(&mut credentials).await?;
        assert_eq!(CredentialStatus::Invalid, credentials.status);
    }
    Ok(())
}
