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

//! Proof-of-possession key negotiation.
//!
//! Bearer tokens have no proof key. For symmetric keys the STS generates a
//! random secret which is either the proof key itself or, when the requester
//! sent its own entropy, combined with the client secret using P_SHA1. For
//! public keys the certificate on file for the caller is preferred over the
//! key sent in the `UseKey` element.

use hmac::{Hmac, Mac};
use rand::RngCore;
use secrecy::SecretSlice;
use sha1::Sha1;
use tracing::{debug, warn};

use crate::sts::backend::{StsConfiguration, TokenEncryptor};
use crate::sts::constants::{
    CK_PSHA1, DEFAULT_KEY_WRAP_ALGORITHM, KEY_TYPE_PUBLIC, KEY_TYPE_SYMMETRIC, MAX_KEY_SIZE,
};
use crate::sts::error::{ProofKeyError, WsTrustError};
use crate::sts::types::{
    BinarySecret, Entropy, KeyInfo, Principal, PublicKey, RequestSecurityToken,
    RequestedProofToken, UseKey,
};

type HmacSha1 = Hmac<Sha1>;

/// P_SHA1 pseudo random function (RFC 2246) producing `required_size`
/// bytes.
pub fn p_sha1(secret: &[u8], seed: &[u8], required_size: usize) -> Result<Vec<u8>, ProofKeyError> {
    let mac = HmacSha1::new_from_slice(secret)
        .map_err(|err| ProofKeyError::CombinedKey(err.to_string()))?;
    let mut result = Vec::with_capacity(required_size);
    // A(0) = seed
    let mut a = seed.to_vec();
    while result.len() < required_size {
        let mut round = mac.clone();
        round.update(&a);
        a = round.finalize().into_bytes().to_vec();

        let mut round = mac.clone();
        round.update(&a);
        round.update(seed);
        result.extend_from_slice(&round.finalize().into_bytes());
    }
    result.truncate(required_size);
    Ok(result)
}

/// Random secret of `size` bytes.
pub fn create_random_secret(size: usize) -> Vec<u8> {
    let mut secret = vec![0u8; size];
    rand::rng().fill_bytes(&mut secret);
    secret
}

/// Check a requested key size (in bits). Sizes above [`MAX_KEY_SIZE`] or
/// not a multiple of 8 are rejected.
pub fn check_key_size(bits: u32) -> Result<u32, WsTrustError> {
    if bits > MAX_KEY_SIZE || bits % 8 != 0 {
        return Err(WsTrustError::InvalidKeySize(bits));
    }
    Ok(bits)
}

/// Outcome of the proof key negotiation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProofKey {
    /// `RequestedProofToken` returned to the requester.
    pub requested_proof_token: Option<RequestedProofToken>,
    /// Entropy contributed by the STS.
    pub server_entropy: Option<Entropy>,
    /// Proof key bound to the issued token.
    pub proof_token_info: Option<KeyInfo>,
}

/// Negotiates the proof key of an issue request.
pub struct ProofKeyNegotiator<'a> {
    configuration: &'a dyn StsConfiguration,
    encryptor: Option<&'a dyn TokenEncryptor>,
}

impl<'a> ProofKeyNegotiator<'a> {
    pub fn new(
        configuration: &'a dyn StsConfiguration,
        encryptor: Option<&'a dyn TokenEncryptor>,
    ) -> Self {
        Self {
            configuration,
            encryptor,
        }
    }

    /// Negotiate the proof key for the key type of the request. The key type
    /// and the key size must already be set.
    pub fn negotiate(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
        provider_public_key: Option<&PublicKey>,
    ) -> Result<ProofKey, WsTrustError> {
        let key_type = request.key_type.as_deref().unwrap_or_default();
        if key_type.eq_ignore_ascii_case(KEY_TYPE_SYMMETRIC) {
            self.symmetric(request, provider_public_key)
        } else if key_type.eq_ignore_ascii_case(KEY_TYPE_PUBLIC) {
            Ok(ProofKey {
                proof_token_info: Some(self.public(request, caller)?),
                ..Default::default()
            })
        } else {
            Ok(ProofKey::default())
        }
    }

    fn symmetric(
        &self,
        request: &RequestSecurityToken,
        provider_public_key: Option<&PublicKey>,
    ) -> Result<ProofKey, WsTrustError> {
        let size = key_size_bytes(request)?;
        let server_secret = create_random_secret(size);
        let server_binary_secret = BinarySecret::nonce(&server_secret);

        let client_secret = match request
            .entropy
            .as_ref()
            .and_then(|entropy| entropy.binary_secret.as_ref())
        {
            Some(secret) => Some(secret.decode().map_err(ProofKeyError::from)?),
            None => None,
        };
        let server_entropy = request.entropy.as_ref().map(|_| Entropy {
            binary_secret: Some(server_binary_secret.clone()),
        });

        match client_secret {
            Some(client_secret) if !client_secret.is_empty() => {
                debug!("Computing the combined proof key");
                let combined = p_sha1(&client_secret, &server_secret, size)?;
                Ok(ProofKey {
                    requested_proof_token: Some(RequestedProofToken::ComputedKey(
                        CK_PSHA1.into(),
                    )),
                    server_entropy,
                    proof_token_info: self.create_key_info(
                        combined,
                        provider_public_key,
                        request.key_wrap_algorithm.as_deref(),
                    )?,
                })
            }
            _ => Ok(ProofKey {
                requested_proof_token: Some(RequestedProofToken::BinarySecret(
                    server_binary_secret,
                )),
                server_entropy,
                proof_token_info: self.create_key_info(
                    server_secret,
                    provider_public_key,
                    request.key_wrap_algorithm.as_deref(),
                )?,
            }),
        }
    }

    fn public(
        &self,
        request: &RequestSecurityToken,
        caller: &Principal,
    ) -> Result<KeyInfo, WsTrustError> {
        if let Some(certificate) = self.configuration.certificate(&caller.name) {
            debug!("Using the certificate on file for {}", caller.name);
            return Ok(KeyInfo::X509Data(vec![certificate.to_base64()]));
        }
        match &request.use_key {
            Some(UseKey::X509Certificate(certificate)) => {
                Ok(KeyInfo::X509Data(vec![certificate.to_base64()]))
            }
            Some(UseKey::KeyValue(key_value)) => Ok(KeyInfo::KeyValue(key_value.clone())),
            Some(UseKey::KeyInfo(key_info)) => Ok(key_info.clone()),
            None => Err(ProofKeyError::NoClientPublicKey.into()),
        }
    }

    /// Wrap the secret for the service provider. Without the service
    /// provider key there is nobody to wrap the secret for.
    fn create_key_info(
        &self,
        secret: Vec<u8>,
        provider_public_key: Option<&PublicKey>,
        key_wrap_algorithm: Option<&str>,
    ) -> Result<Option<KeyInfo>, WsTrustError> {
        let Some(public_key) = provider_public_key else {
            warn!("No service provider public key, the proof key info is not created");
            return Ok(None);
        };
        let encryptor = self
            .encryptor
            .ok_or(WsTrustError::MissingCollaborator("token encryptor"))?;
        let secret: SecretSlice<u8> = secret.into();
        encryptor
            .encrypt_key(
                &secret,
                public_key,
                key_wrap_algorithm.unwrap_or(DEFAULT_KEY_WRAP_ALGORITHM),
            )
            .map(Some)
            .map_err(|source| ProofKeyError::KeyWrap { source }.into())
    }
}

fn key_size_bytes(request: &RequestSecurityToken) -> Result<usize, WsTrustError> {
    Ok(request
        .key_size
        .map(check_key_size)
        .transpose()?
        .map(|bits| (bits / 8) as usize)
        .unwrap_or_default())
}
