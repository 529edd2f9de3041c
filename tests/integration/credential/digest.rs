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
use secrecy::SecretString;

use sts_core::config::Config;
use sts_core::credential::CredentialApi;
use sts_core::credential::digest::{compute_response, hash_a1, hash_a2, simple_digest};
use sts_core::credential::types::{
    CredentialStatus, CredentialUpdate, Credentials, DigestCredentials,
};
use sts_core::plugin_manager::PluginManager;

use super::setup;

const REALM: &str = "testrealm@host.com";

#[tokio::test]
async fn test_digest_response() -> Result<(), Report> {
    let (provider, _, john) = setup(&Config::default(), PluginManager::default())?;
    let password = SecretString::from("Circle Of Life");
    provider
        .update_credential(
            &john,
            &CredentialUpdate::Digest {
                realm: REALM.into(),
                password: password.clone(),
            },
            None,
            None,
        )
        .await?;

    let ha1 = hash_a1("john", REALM, &password);
    let response = compute_response(
        &ha1,
        "dcd98b7102dd2f0e8b11d0f600bfb0c093",
        "00000001",
        "0a4f113b",
        "auth",
        &hash_a2("GET", "/dir/index.html"),
    );
    let digest = |digest: String| -> Credentials {
        DigestCredentials {
            username: "john".into(),
            realm: REALM.into(),
            digest,
            method: Some("GET".into()),
            uri: Some("/dir/index.html".into()),
            nonce: Some("dcd98b7102dd2f0e8b11d0f600bfb0c093".into()),
            nc: Some("00000001".into()),
            cnonce: Some("0a4f113b".into()),
            qop: Some("auth".into()),
        }
        .into()
    };

    let mut credentials = digest(response.to_uppercase());
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Valid, credentials.status);

    let mut credentials = digest("6629fae49393a05397450978507c4ef1".into());
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Invalid, credentials.status);
    Ok(())
}

#[tokio::test]
async fn test_digest_coarse() -> Result<(), Report> {
    let (provider, _, john) = setup(&Config::default(), PluginManager::default())?;
    let password = SecretString::from("Circle Of Life");
    provider
        .update_credential(
            &john,
            &CredentialUpdate::Digest {
                realm: REALM.into(),
                password: password.clone(),
            },
            None,
            None,
        )
        .await?;

    let mut credentials: Credentials = DigestCredentials {
        username: "john".into(),
        realm: REALM.into(),
        digest: simple_digest(&hash_a1("john", REALM, &password)),
        ..Default::default()
    }
    .into();
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Valid, credentials.status);

    // other realm has no stored credential
    let mut credentials: Credentials = DigestCredentials {
        username: "john".into(),
        realm: "other".into(),
        digest: simple_digest(&hash_a1("john", "other", &password)),
        ..Default::default()
    }
    .into();
    provider.validate_credentials(&mut credentials).await?;
    assert_eq!(CredentialStatus::Invalid, credentials.status);
    Ok(())
}
