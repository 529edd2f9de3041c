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

//! Credentials presented by a caller to prove its identity.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use secrecy::SecretString;
use std::fmt;

use crate::credential::types::Account;
use crate::error::BuilderError;

/// Kind of a credential.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CredentialKind {
    Password,
    Digest,
    X509Certificate,
    Totp,
    Token,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password => write!(f, "password"),
            Self::Digest => write!(f, "digest"),
            Self::X509Certificate => write!(f, "x509"),
            Self::Totp => write!(f, "totp"),
            Self::Token => write!(f, "token"),
        }
    }
}

/// Outcome of a credential validation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CredentialStatus {
    /// Validation has not been attempted yet.
    #[default]
    Uninitialized,
    /// Validation is running.
    InProgress,
    /// Credential is valid.
    Valid,
    /// Credential is invalid or the account is unknown.
    Invalid,
    /// Credential matches, but the stored credential has expired.
    Expired,
    /// Account owning the credential is disabled.
    AccountDisabled,
}

/// Username and password.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct UsernamePasswordCredentials {
    pub username: String,
    pub password: SecretString,
}

/// HTTP digest credentials.
///
/// When `method` and `uri` are present the `digest` is the hex encoded
/// response computed by the client over the server nonce. Otherwise `digest`
/// is compared with the standard base64 encoding of the stored HA1.
#[derive(Builder, Clone, Debug, Default)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct DigestCredentials {
    pub username: String,
    pub realm: String,
    pub digest: String,
    #[builder(default)]
    pub method: Option<String>,
    #[builder(default)]
    pub uri: Option<String>,
    #[builder(default)]
    pub nonce: Option<String>,
    #[builder(default)]
    pub nc: Option<String>,
    #[builder(default)]
    pub cnonce: Option<String>,
    #[builder(default)]
    pub qop: Option<String>,
}

/// X.509 client certificate.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct X509CertificateCredentials {
    /// Login name of the account the certificate was issued to.
    pub username: String,
    /// DER encoded certificate.
    pub certificate: Vec<u8>,
    /// Certificate has already been verified by a trusted party (i.e. the
    /// TLS layer), the stored certificate is not compared.
    #[builder(default)]
    pub trusted: bool,
}

/// Password combined with a time based one-time password.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct TotpCredentials {
    pub username: String,
    pub password: SecretString,
    /// One-time code.
    pub token: String,
    /// Device the code was generated on. When absent the secrets of all the
    /// devices of the account are tried.
    #[builder(default)]
    pub device: Option<String>,
}

/// Opaque token issued by a token provider.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct OpaqueToken {
    /// Type of the token. Used to select the provider and the stored token.
    pub token_type: String,
    /// Wire value.
    pub value: SecretString,
    /// ID of the account the token was issued to.
    pub subject: String,
    #[builder(default)]
    pub expiration: Option<DateTime<Utc>>,
}

/// Token credentials.
#[derive(Clone, Debug)]
pub struct TokenCredentials {
    pub token: OpaqueToken,
}

/// Credential value.
#[derive(Clone, Debug)]
pub enum CredentialValue {
    UsernamePassword(UsernamePasswordCredentials),
    Digest(DigestCredentials),
    X509Certificate(X509CertificateCredentials),
    Totp(TotpCredentials),
    Token(TokenCredentials),
}

impl CredentialValue {
    pub fn kind(&self) -> CredentialKind {
        match self {
            Self::UsernamePassword(_) => CredentialKind::Password,
            Self::Digest(_) => CredentialKind::Digest,
            Self::X509Certificate(_) => CredentialKind::X509Certificate,
            Self::Totp(_) => CredentialKind::Totp,
            Self::Token(_) => CredentialKind::Token,
        }
    }
}

/// Credentials of a single authentication attempt.
///
/// The status and the validated account are filled by the credential
/// handler. An instance is meant to be validated once and discarded.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// Value presented by the caller.
    pub value: CredentialValue,
    /// Validation status.
    pub status: CredentialStatus,
    /// Account the credentials were validated for. Only present when the
    /// status is [`CredentialStatus::Valid`].
    pub validated_account: Option<Account>,
}

impl Credentials {
    pub fn new(value: CredentialValue) -> Self {
        Self {
            value,
            status: CredentialStatus::Uninitialized,
            validated_account: None,
        }
    }

    pub fn kind(&self) -> CredentialKind {
        self.value.kind()
    }

    /// Mark the credentials invalid and drop the validated account.
    pub fn invalidate(&mut self) {
        self.status = CredentialStatus::Invalid;
        self.validated_account = None;
    }
}

impl From<UsernamePasswordCredentials> for Credentials {
    fn from(value: UsernamePasswordCredentials) -> Self {
        Self::new(CredentialValue::UsernamePassword(value))
    }
}

impl From<DigestCredentials> for Credentials {
    fn from(value: DigestCredentials) -> Self {
        Self::new(CredentialValue::Digest(value))
    }
}

impl From<X509CertificateCredentials> for Credentials {
    fn from(value: X509CertificateCredentials) -> Self {
        Self::new(CredentialValue::X509Certificate(value))
    }
}

impl From<TotpCredentials> for Credentials {
    fn from(value: TotpCredentials) -> Self {
        Self::new(CredentialValue::Totp(value))
    }
}

impl From<OpaqueToken> for Credentials {
    fn from(token: OpaqueToken) -> Self {
        Self::new(CredentialValue::Token(TokenCredentials { token }))
    }
}
