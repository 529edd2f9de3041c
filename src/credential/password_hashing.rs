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

//! Password encoders.
//!
//! An encoder turns a salted password (the salt prepended to the raw
//! password) into the value persisted in the credential store.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use std::cmp::max;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::task;
use tracing::warn;

use crate::config::Config;
use crate::credential::error::{CredentialProviderError, PasswordHashError};
use crate::plugin_manager::PluginManager;

#[async_trait]
pub trait PasswordEncoder: Send + Sync + std::fmt::Debug {
    /// Encode the salted password.
    async fn encode(&self, salted_password: &SecretString) -> Result<String, PasswordHashError>;

    /// Verify the salted password against the encoded value.
    async fn verify(
        &self,
        salted_password: &SecretString,
        expected_encoded: &str,
    ) -> Result<bool, PasswordHashError>;
}

/// Select the password encoder configured in the `credential` section.
pub fn password_encoder(
    config: &Config,
    plugin_manager: &PluginManager,
) -> Result<Arc<dyn PasswordEncoder>, CredentialProviderError> {
    let name = config.credential.password_encoder.as_str();
    if let Some(encoder) = plugin_manager.get_password_encoder(name) {
        return Ok(encoder.clone());
    }
    match name {
        "sha512" => Ok(Arc::new(Sha512PasswordEncoder::new(
            config.credential.password_hash_strength.unwrap_or(1),
        ))),
        "bcrypt" => Ok(Arc::new(BcryptPasswordEncoder::new(
            config.credential.password_hash_strength.unwrap_or(12),
            config.credential.max_password_length,
        ))),
        other => Err(CredentialProviderError::UnsupportedDriver(other.to_string())),
    }
}

/// Salted SHA-512 applied `strength` times, base64 encoded.
#[derive(Clone, Debug)]
pub struct Sha512PasswordEncoder {
    strength: u32,
}

impl Sha512PasswordEncoder {
    pub fn new(strength: u32) -> Self {
        Self {
            strength: max(strength, 1),
        }
    }

    fn hash(&self, salted_password: &SecretString) -> String {
        let mut digest = Sha512::digest(salted_password.expose_secret().as_bytes());
        for _ in 1..self.strength {
            digest = Sha512::digest(digest);
        }
        STANDARD.encode(digest)
    }
}

#[async_trait]
impl PasswordEncoder for Sha512PasswordEncoder {
    async fn encode(&self, salted_password: &SecretString) -> Result<String, PasswordHashError> {
        Ok(self.hash(salted_password))
    }

    async fn verify(
        &self,
        salted_password: &SecretString,
        expected_encoded: &str,
    ) -> Result<bool, PasswordHashError> {
        let encoded = self.hash(salted_password);
        Ok(encoded.as_bytes().ct_eq(expected_encoded.as_bytes()).into())
    }
}

/// Bcrypt with the given cost. Hashing runs on the blocking thread pool.
///
/// Bcrypt only reads the first 72 bytes of its input, and the salt takes up
/// to 20 of them. The salted password is therefore hashed with SHA-512 and
/// the base64 digest is handed to bcrypt, so every byte of the password
/// (up to `max_password_length`) counts.
#[derive(Clone, Debug)]
pub struct BcryptPasswordEncoder {
    cost: u32,
    max_password_length: usize,
}

impl BcryptPasswordEncoder {
    pub fn new(cost: u32, max_password_length: usize) -> Self {
        Self {
            cost,
            max_password_length: max(max_password_length, 72),
        }
    }
}

fn verify_length_and_trunc_password(password: &[u8], max_length: usize) -> &[u8] {
    if password.len() > max_length {
        warn!("Truncating password to the specified value");
        return &password[..max_length];
    }
    password
}

/// SHA-512 of the (length checked) salted password, base64 encoded.
fn bcrypt_input(salted_password: &SecretString, max_length: usize) -> Vec<u8> {
    let password =
        verify_length_and_trunc_password(salted_password.expose_secret().as_bytes(), max_length);
    STANDARD.encode(Sha512::digest(password)).into_bytes()
}

#[async_trait]
impl PasswordEncoder for BcryptPasswordEncoder {
    async fn encode(&self, salted_password: &SecretString) -> Result<String, PasswordHashError> {
        let password_bytes = bcrypt_input(salted_password, self.max_password_length);
        let cost = self.cost;
        let hash = task::spawn_blocking(move || bcrypt::hash(password_bytes, cost)).await??;
        Ok(hash)
    }

    async fn verify(
        &self,
        salted_password: &SecretString,
        expected_encoded: &str,
    ) -> Result<bool, PasswordHashError> {
        let password_bytes = bcrypt_input(salted_password, self.max_password_length);
        let password_hash = expected_encoded.to_string();
        // Do not block the runtime with a definitely long running call.
        let verify =
            task::spawn_blocking(move || bcrypt::verify(password_bytes, &password_hash)).await??;
        Ok(verify)
    }
}
