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

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::TimeDelta;
use eyre::{OptionExt, Report};

use sts_core::config::Config;
use sts_core::error::StsCoreError;
use sts_core::plugin_manager::PluginManager;
use sts_core::provider::Provider;
use sts_core::sts::StsApi;
use sts_core::sts::constants::*;
use sts_core::sts::error::{ProofKeyError, WsTrustError};
use sts_core::sts::proof::p_sha1;
use sts_core::sts::types::{
    AppliesTo, BinarySecret, Certificate, Entropy, KeyInfo, OnBehalfOf, Principal,
    RequestSecurityToken, RequestedProofToken, UseKey,
};

use super::{SERVICE, XMLENC_NS, service_key, setup};

#[test]
fn test_issue_bearer() -> Result<(), Report> {
    let mut config = Config::default();
    config.sts.token_timeout = 300;
    let (provider, tokens) = setup(config.clone(), false)?;

    let request = RequestSecurityToken::builder()
        .context("ctx-1")
        .applies_to(AppliesTo::endpoint(SERVICE))
        .on_behalf_of(OnBehalfOf::UsernameToken {
            id: None,
            username: "jane".into(),
        })
        .build()?;
    let response = provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))?;

    assert_eq!(Some("ctx-1".into()), response.context);
    assert_eq!(Some(SAML2_TOKEN_TYPE.into()), response.token_type);
    assert_eq!(Some(KEY_TYPE_BEARER.into()), response.key_type);
    assert_eq!(Some(DEFAULT_KEY_SIZE), response.key_size);
    let lifetime = response.lifetime.ok_or_eyre("default lifetime")?;
    assert_eq!(TimeDelta::seconds(300), lifetime.expires - lifetime.created);
    assert!(response.requested_proof_token.is_none());
    assert!(response.entropy.is_none());
    let token = response
        .requested_security_token
        .ok_or_eyre("issued token")?;
    assert_eq!("Assertion", token.local_name);
    // no key pair, no signature
    assert!(!token.attributes.contains_key("Signature"));

    let context = tokens.last_context().ok_or_eyre("issue context")?;
    assert_eq!(Some(config.sts.name.clone()), context.token_issuer);
    assert_eq!(Principal::from("john"), context.caller_principal);
    assert_eq!(Some(Principal::from("jane")), context.on_behalf_of_principal);
    assert_eq!(Some(service_key()), context.service_provider_public_key);
    assert!(context.proof_token_info.is_none());
    Ok(())
}

#[test]
fn test_issue_symmetric_with_entropy() -> Result<(), Report> {
    let (provider, tokens) = setup(Config::default(), false)?;
    let client_secret = b"0123456789abcdef0123456789abcdef".to_vec();

    let request = RequestSecurityToken::builder()
        .applies_to(AppliesTo::endpoint(SERVICE))
        .key_type(KEY_TYPE_SYMMETRIC)
        .key_size(256u32)
        .entropy(Entropy {
            binary_secret: Some(BinarySecret::nonce(&client_secret)),
        })
        .build()?;
    let response = provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))?;

    assert_eq!(
        Some(RequestedProofToken::ComputedKey(CK_PSHA1.into())),
        response.requested_proof_token
    );
    let server_secret = response
        .entropy
        .and_then(|entropy| entropy.binary_secret)
        .ok_or_eyre("server entropy")?;
    assert_eq!(Some(BS_TYPE_NONCE.into()), server_secret.secret_type);
    let server_secret = server_secret.decode()?;
    assert_eq!(32, server_secret.len());

    // the service gets the combined key wrapped for it
    let context = tokens.last_context().ok_or_eyre("issue context")?;
    assert_eq!(
        Some(KeyInfo::EncryptedKey {
            algorithm: DEFAULT_KEY_WRAP_ALGORITHM.into(),
            cipher_value: STANDARD.encode(p_sha1(&client_secret, &server_secret, 32)?),
        }),
        context.proof_token_info
    );
    Ok(())
}

#[test]
fn test_issue_symmetric_without_entropy() -> Result<(), Report> {
    let (provider, tokens) = setup(Config::default(), false)?;

    let request = RequestSecurityToken::builder()
        .applies_to(AppliesTo::endpoint(SERVICE))
        .key_type(KEY_TYPE_SYMMETRIC)
        .build()?;
    let response = provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))?;

    assert!(response.entropy.is_none());
    let Some(RequestedProofToken::BinarySecret(secret)) = response.requested_proof_token else {
        panic!("the proof key itself must be returned");
    };
    let secret = secret.decode()?;
    assert_eq!(16, secret.len());
    let context = tokens.last_context().ok_or_eyre("issue context")?;
    assert_eq!(
        Some(KeyInfo::EncryptedKey {
            algorithm: DEFAULT_KEY_WRAP_ALGORITHM.into(),
            cipher_value: STANDARD.encode(&secret),
        }),
        context.proof_token_info
    );
    Ok(())
}

#[test]
fn test_issue_oversized_key() -> Result<(), Report> {
    let (provider, tokens) = setup(Config::default(), false)?;

    let request = RequestSecurityToken::builder()
        .applies_to(AppliesTo::endpoint(SERVICE))
        .key_type(KEY_TYPE_SYMMETRIC)
        .key_size(MAX_KEY_SIZE * 2)
        .entropy(Entropy {
            binary_secret: Some(BinarySecret::nonce(&[7; 16])),
        })
        .build()?;
    assert!(matches!(
        provider
            .get_sts_provider()
            .handle(&request, &Principal::from("john")),
        Err(WsTrustError::InvalidKeySize(8192))
    ));
    assert!(tokens.last_context().is_none());
    Ok(())
}

#[test]
fn test_issue_public_key() -> Result<(), Report> {
    let (provider, tokens) = setup(Config::default(), false)?;
    let certificate = Certificate(vec![0x30, 0x82, 0x02, 0x5d]);

    let request = RequestSecurityToken::builder()
        .key_type(KEY_TYPE_PUBLIC)
        .use_key(UseKey::X509Certificate(certificate.clone()))
        .build()?;
    let response = provider
        .get_sts_provider()
        .issue(&request, &Principal::from("john"))?;
    assert!(response.requested_proof_token.is_none());
    let context = tokens.last_context().ok_or_eyre("issue context")?;
    assert_eq!(
        Some(KeyInfo::X509Data(vec![certificate.to_base64()])),
        context.proof_token_info
    );

    let request = RequestSecurityToken::builder()
        .key_type(KEY_TYPE_PUBLIC)
        .build()?;
    assert!(matches!(
        provider
            .get_sts_provider()
            .issue(&request, &Principal::from("john")),
        Err(WsTrustError::ProofKey {
            source: ProofKeyError::NoClientPublicKey
        })
    ));
    Ok(())
}

#[test]
fn test_issue_signed() -> Result<(), Report> {
    let config = Config::default();
    let (provider, _) = setup(config.clone(), true)?;

    let request = RequestSecurityToken::builder()
        .applies_to(AppliesTo::endpoint(SERVICE))
        .build()?;
    let response = provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))?;
    let token = response
        .requested_security_token
        .ok_or_eyre("issued token")?;
    let id = token.attributes.get("ID").ok_or_eyre("assertion ID")?;
    assert_eq!(
        Some(&format!("{}#{id}", config.sts.signature_method)),
        token.attributes.get("Signature")
    );
    assert_eq!(Some("ID".into()), token.id_attribute);
    Ok(())
}

#[test]
fn test_issue_encrypted() -> Result<(), Report> {
    let mut config = Config::default();
    config.sts.encrypt_token = true;
    let (provider, _) = setup(config, true)?;

    let request = RequestSecurityToken::builder()
        .applies_to(AppliesTo::endpoint(SERVICE))
        .key_size(256u32)
        .build()?;
    let response = provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))?;
    let token = response
        .requested_security_token
        .ok_or_eyre("issued token")?;
    assert_eq!(Some(XMLENC_NS.into()), token.namespace);
    assert_eq!("EncryptedData", token.local_name);
    assert_eq!(Some(&"256".to_string()), token.attributes.get("KeySize"));
    assert_eq!(Some(&"32".to_string()), token.attributes.get("SecretLength"));

    // unknown service, nothing to encrypt for
    let request = RequestSecurityToken::builder()
        .applies_to(AppliesTo::endpoint("https://other.example.com"))
        .build()?;
    let response = provider
        .get_sts_provider()
        .handle(&request, &Principal::from("john"))?;
    let token = response
        .requested_security_token
        .ok_or_eyre("issued token")?;
    assert_eq!("Assertion", token.local_name);
    Ok(())
}

#[test]
fn test_missing_token_provider() {
    let err = Provider::new(Config::default(), PluginManager::default())
        .err()
        .expect("provider without the security token provider");
    assert!(matches!(
        err,
        StsCoreError::WsTrust {
            source: WsTrustError::MissingCollaborator(_)
        }
    ));
}
