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

use thiserror::Error;

use crate::error::BuilderError;

/// Failure reported by a collaborator (token provider, signer, encryptor,
/// claims processor).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ProcessingError {
    pub message: String,
}

impl ProcessingError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum WsTrustError {
    /// Required request element is missing.
    #[error("request does not have a {0}")]
    MissingElement(&'static str),

    /// Token provider did not put a token into the context.
    #[error("token {0} by the STS was null")]
    NullToken(&'static str),

    /// Signature of the token to renew is not valid.
    #[error("validation failure during renewal: {0}")]
    Signature(String),

    /// Issued token could not be signed.
    #[error("signing process failure")]
    Signing {
        #[source]
        source: ProcessingError,
    },

    /// Issued token could not be encrypted.
    #[error("encryption process failure")]
    Encryption {
        #[source]
        source: ProcessingError,
    },

    /// Collaborator required by the configuration is not registered.
    #[error("no {0} has been registered")]
    MissingCollaborator(&'static str),

    /// Requested key size is above the limit or not a whole number of
    /// bytes.
    #[error("invalid key size {0}")]
    InvalidKeySize(u32),

    #[error("unsupported request type {0}")]
    UnsupportedRequestType(String),

    #[error(transparent)]
    Processing {
        #[from]
        source: ProcessingError,
    },

    #[error(transparent)]
    ProofKey {
        #[from]
        source: ProofKeyError,
    },

    #[error(transparent)]
    Builder {
        #[from]
        source: BuilderError,
    },
}

/// Proof-of-possession key negotiation failure.
#[derive(Error, Debug)]
pub enum ProofKeyError {
    /// Client and server secrets could not be combined.
    #[error("combined secret key could not be computed: {0}")]
    CombinedKey(String),

    /// Client entropy is not base64 encoded.
    #[error("client entropy can not be decoded")]
    InvalidEntropy {
        #[from]
        source: base64::DecodeError,
    },

    /// Public key requested but neither a certificate on file nor a
    /// `UseKey` is available.
    #[error("no client public key available")]
    NoClientPublicKey,

    /// Proof key could not be wrapped for the service provider.
    #[error("proof key could not be wrapped for the service provider")]
    KeyWrap {
        #[source]
        source: ProcessingError,
    },
}
