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

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use std::fmt;

use crate::error::BuilderError;
use crate::sts::constants::{CANCEL_REQUEST, ISSUE_REQUEST, RENEW_REQUEST, VALIDATE_REQUEST};
use crate::sts::error::WsTrustError;
use crate::sts::types::{Entropy, QName, TokenElement, UseKey};

/// WS-Trust binding requested by the `RequestType` element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RequestType {
    #[default]
    Issue,
    Renew,
    Validate,
    Cancel,
}

impl RequestType {
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Issue => ISSUE_REQUEST,
            Self::Renew => RENEW_REQUEST,
            Self::Validate => VALIDATE_REQUEST,
            Self::Cancel => CANCEL_REQUEST,
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

impl TryFrom<&str> for RequestType {
    type Error = WsTrustError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            ISSUE_REQUEST => Ok(Self::Issue),
            RENEW_REQUEST => Ok(Self::Renew),
            VALIDATE_REQUEST => Ok(Self::Validate),
            CANCEL_REQUEST => Ok(Self::Cancel),
            other => Err(WsTrustError::UnsupportedRequestType(other.to_string())),
        }
    }
}

/// Authenticated caller of the STS.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Principal {
    pub name: String,
}

impl From<&str> for Principal {
    fn from(value: &str) -> Self {
        Self { name: value.into() }
    }
}

impl From<String> for Principal {
    fn from(value: String) -> Self {
        Self { name: value }
    }
}

/// Lifetime of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifetime {
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// Content of the `AppliesTo` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppliesToContent {
    EndpointReference { address: Option<String> },
    /// Any other element, identified by its name.
    Other(QName),
}

/// Scope (service) the requested token applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppliesTo {
    pub any: Vec<AppliesToContent>,
}

impl AppliesTo {
    /// `AppliesTo` with a single endpoint reference.
    pub fn endpoint<S: Into<String>>(address: S) -> Self {
        Self {
            any: vec![AppliesToContent::EndpointReference {
                address: Some(address.into()),
            }],
        }
    }
}

/// Content of the `OnBehalfOf` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OnBehalfOf {
    UsernameToken {
        id: Option<String>,
        username: String,
    },
    /// Any other token, identified by its name.
    Other(QName),
}

/// Claim requested for the issued token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimType {
    pub uri: String,
    pub optional: bool,
}

/// `Claims` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claims {
    pub dialect: String,
    pub claim_types: Vec<ClaimType>,
}

/// Attribute resolved by a claims processor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<String>,
}

/// `RenewTarget`, `ValidateTarget` or `CancelTarget` wrapping the token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenTarget {
    pub token: Option<TokenElement>,
}

impl From<TokenElement> for TokenTarget {
    fn from(value: TokenElement) -> Self {
        Self { token: Some(value) }
    }
}

/// `RequestSecurityToken` message.
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct RequestSecurityToken {
    #[builder(default)]
    pub context: Option<String>,

    #[builder(default)]
    pub request_type: RequestType,

    #[builder(default)]
    pub token_type: Option<String>,

    #[builder(default)]
    pub applies_to: Option<AppliesTo>,

    #[builder(default)]
    pub lifetime: Option<Lifetime>,

    #[builder(default)]
    pub claims: Option<Claims>,

    #[builder(default)]
    pub on_behalf_of: Option<OnBehalfOf>,

    #[builder(default)]
    pub key_type: Option<String>,

    /// Requested key size in bits.
    #[builder(default)]
    pub key_size: Option<u32>,

    #[builder(default)]
    pub key_wrap_algorithm: Option<String>,

    #[builder(default)]
    pub signature_algorithm: Option<String>,

    #[builder(default)]
    pub entropy: Option<Entropy>,

    #[builder(default)]
    pub use_key: Option<UseKey>,

    #[builder(default)]
    pub renew_target: Option<TokenTarget>,

    #[builder(default)]
    pub validate_target: Option<TokenTarget>,

    #[builder(default)]
    pub cancel_target: Option<TokenTarget>,
}

impl RequestSecurityToken {
    pub fn builder() -> RequestSecurityTokenBuilder {
        RequestSecurityTokenBuilder::default()
    }
}
