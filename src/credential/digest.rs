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

//! HTTP digest (RFC 2617) hashes.
//!
//! MD5 is mandated by the digest scheme and is kept for interoperability
//! only. The HA1 must not be treated as a general purpose password hash.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::credential::types::DigestCredentials;

fn md5_of(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = Md5::new();
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            hasher.update(b":");
        }
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

/// HA1 = MD5(username ":" realm ":" password).
pub fn hash_a1(username: &str, realm: &str, password: &SecretString) -> Vec<u8> {
    md5_of(&[
        username.as_bytes(),
        realm.as_bytes(),
        password.expose_secret().as_bytes(),
    ])
}

/// HA2 = MD5(method ":" uri).
pub fn hash_a2(method: &str, uri: &str) -> Vec<u8> {
    md5_of(&[method.as_bytes(), uri.as_bytes()])
}

/// Request digest: lowercase hex of
/// MD5(hex(HA1) ":" nonce ":" nc ":" cnonce ":" qop ":" hex(HA2)).
pub fn compute_response(
    ha1: &[u8],
    nonce: &str,
    nc: &str,
    cnonce: &str,
    qop: &str,
    ha2: &[u8],
) -> String {
    let ha1_hex = hex::encode(ha1);
    let ha2_hex = hex::encode(ha2);
    hex::encode(md5_of(&[
        ha1_hex.as_bytes(),
        nonce.as_bytes(),
        nc.as_bytes(),
        cnonce.as_bytes(),
        qop.as_bytes(),
        ha2_hex.as_bytes(),
    ]))
}

/// Coarse digest used when the client does not send the method and the URI:
/// the standard (padded) base64 encoding of the HA1.
pub fn simple_digest(ha1: &[u8]) -> String {
    STANDARD.encode(ha1)
}

/// Compare two digests ignoring the ASCII case.
pub fn digest_matches(expected: &str, provided: &str) -> bool {
    expected.eq_ignore_ascii_case(provided)
}

/// Compute the digest the client is expected to send for the credentials.
///
/// Returns `None` when the credentials lack a field required for the full
/// request digest.
pub fn expected_response(credentials: &DigestCredentials, ha1: &[u8]) -> Option<String> {
    let method = credentials.method.as_deref()?;
    let uri = credentials.uri.as_deref()?;
    Some(compute_response(
        ha1,
        credentials.nonce.as_deref().unwrap_or_default(),
        credentials.nc.as_deref().unwrap_or_default(),
        credentials.cnonce.as_deref().unwrap_or_default(),
        credentials.qop.as_deref().unwrap_or_default(),
        &hash_a2(method, uri),
    ))
}

#[derive(Error, Debug, PartialEq)]
pub enum DigestValidationError {
    /// Mandatory field missing.
    #[error("mandatory field '{0}' not specified")]
    MissingField(&'static str),

    /// Nonce is not `base64(expiry ":" signature)`.
    #[error("malformed nonce: {0}")]
    MalformedNonce(String),

    /// Realm does not match the realm of the server.
    #[error("realm [{provided}] does not match system realm [{expected}]")]
    RealmMismatch { provided: String, expected: String },

    /// Nonce has expired. The client should retry with a fresh nonce.
    #[error("nonce has expired")]
    Stale,

    /// Nonce was not issued by this server.
    #[error("nonce signature is invalid")]
    InvalidNonceSignature,
}

impl DigestValidationError {
    /// Whether the client may simply retry with a new nonce.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

fn nonce_signature(expiry_millis: i64, key: &str) -> String {
    hex::encode(md5_of(&[expiry_millis.to_string().as_bytes(), key.as_bytes()]))
}

/// Generate a server nonce valid until `expiry`:
/// base64(expiry_millis ":" hex(MD5(expiry_millis ":" key))).
pub fn generate_nonce(expiry: DateTime<Utc>, key: &str) -> String {
    let expiry_millis = expiry.timestamp_millis();
    STANDARD.encode(format!(
        "{}:{}",
        expiry_millis,
        nonce_signature(expiry_millis, key)
    ))
}

/// Validate the digest request parameters and the server nonce.
pub fn validate_nonce(
    credentials: &DigestCredentials,
    system_realm: &str,
    key: &str,
    now: DateTime<Utc>,
) -> Result<(), DigestValidationError> {
    if credentials.realm.is_empty() {
        return Err(DigestValidationError::MissingField("realm"));
    }
    let nonce = credentials
        .nonce
        .as_deref()
        .ok_or(DigestValidationError::MissingField("nonce"))?;
    if credentials.uri.is_none() {
        return Err(DigestValidationError::MissingField("uri"));
    }
    if credentials.digest.is_empty() {
        return Err(DigestValidationError::MissingField("response"));
    }
    if credentials.qop.as_deref() == Some("auth") {
        if credentials.nc.is_none() {
            return Err(DigestValidationError::MissingField("nc"));
        }
        if credentials.cnonce.is_none() {
            return Err(DigestValidationError::MissingField("cnonce"));
        }
    }

    let decoded = STANDARD
        .decode(nonce)
        .ok()
        .and_then(|raw| String::from_utf8(raw).ok())
        .ok_or_else(|| DigestValidationError::MalformedNonce(nonce.to_string()))?;
    let Some((expiry, signature)) = decoded.split_once(':') else {
        return Err(DigestValidationError::MalformedNonce(nonce.to_string()));
    };

    if credentials.realm != system_realm {
        return Err(DigestValidationError::RealmMismatch {
            provided: credentials.realm.clone(),
            expected: system_realm.to_string(),
        });
    }

    let expiry_millis: i64 = expiry
        .parse()
        .map_err(|_| DigestValidationError::MalformedNonce(nonce.to_string()))?;

    if expiry_millis < now.timestamp_millis() {
        return Err(DigestValidationError::Stale);
    }

    if nonce_signature(expiry_millis, key) != signature {
        return Err(DigestValidationError::InvalidNonceSignature);
    }
    Ok(())
}
