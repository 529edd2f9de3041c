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

//! Key material exchanged in the WS-Trust messages.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use secrecy::SecretSlice;

use crate::sts::constants::BS_TYPE_NONCE;

/// DER encoded X.509 certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate(pub Vec<u8>);

impl Certificate {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

/// Encoded public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// Key algorithm (i.e. `RSA`).
    pub algorithm: String,
    /// DER encoded `SubjectPublicKeyInfo`.
    pub encoded: Vec<u8>,
}

/// Key pair of the STS used to sign the issued tokens and to verify the
/// signature of the tokens presented for renewal or validation.
#[derive(Debug)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: SecretSlice<u8>,
}

impl KeyPair {
    pub fn new(public_key: PublicKey, private_key: Vec<u8>) -> Self {
        Self {
            public_key,
            private_key: private_key.into(),
        }
    }
}

/// `KeyValue` of the XML signature syntax. Components are base64 encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyValue {
    Rsa {
        modulus: String,
        exponent: String,
    },
    Dsa {
        p: String,
        q: String,
        g: String,
        y: String,
    },
}

/// `KeyInfo` describing the proof key to the token issuer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyInfo {
    /// Symmetric proof key wrapped for the recipient.
    EncryptedKey {
        /// Key wrap algorithm.
        algorithm: String,
        /// Base64 encoded wrapped key.
        cipher_value: String,
    },
    /// Base64 encoded DER certificates.
    X509Data(Vec<String>),
    KeyValue(KeyValue),
}

/// `BinarySecret` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinarySecret {
    pub secret_type: Option<String>,
    /// Base64 encoded secret.
    pub value: String,
}

impl BinarySecret {
    /// Nonce typed binary secret.
    pub fn nonce(secret: &[u8]) -> Self {
        Self {
            secret_type: Some(BS_TYPE_NONCE.into()),
            value: STANDARD.encode(secret),
        }
    }

    /// Decoded secret bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.value.trim())
    }
}

/// `Entropy` contributed by the requester or by the STS.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entropy {
    pub binary_secret: Option<BinarySecret>,
}

/// Key the requester wants to have bound to the issued token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UseKey {
    X509Certificate(Certificate),
    KeyValue(KeyValue),
    KeyInfo(KeyInfo),
}

/// `RequestedProofToken` of the response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestedProofToken {
    /// The proof key is computed by both sides with the algorithm.
    ComputedKey(String),
    /// The proof key itself.
    BinarySecret(BinarySecret),
}
