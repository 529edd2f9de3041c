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

use derive_builder::Builder;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::BuilderError;
use crate::sts::constants::{SAML11_ASSERTION_NS, SAML2_ASSERTION_NS};

/// Qualified name of an element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: Option<String>,
    pub local_name: String,
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{namespace}}}{}", self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Security token element carried in the WS-Trust messages.
///
/// The element is opaque to the STS: the serialized form is produced and
/// consumed by the token provider, signer and encryptor. Only the name and
/// the attributes are inspected.
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into))]
pub struct TokenElement {
    #[builder(default, setter(strip_option))]
    pub namespace: Option<String>,

    pub local_name: String,

    #[builder(default)]
    pub attributes: BTreeMap<String, String>,

    /// Serialized element.
    #[builder(default)]
    pub content: Vec<u8>,

    /// Name of the attribute registered as the element ID.
    #[builder(default, setter(strip_option))]
    pub id_attribute: Option<String>,
}

impl TokenElement {
    pub fn builder() -> TokenElementBuilder {
        TokenElementBuilder::default()
    }

    pub fn qname(&self) -> QName {
        QName {
            namespace: self.namespace.clone(),
            local_name: self.local_name.clone(),
        }
    }

    /// Register the ID attribute of a SAML 2.0 (`ID`) or SAML 1.1
    /// (`AssertionID`) assertion and return the `#id` reference to it. Any
    /// other element gets an empty reference.
    pub fn setup_id_attribute(&mut self) -> String {
        if self.local_name != "Assertion" {
            return String::new();
        }
        let attribute = match self.namespace.as_deref() {
            Some(SAML2_ASSERTION_NS) => "ID",
            Some(SAML11_ASSERTION_NS) => "AssertionID",
            _ => return String::new(),
        };
        match self.attributes.get(attribute) {
            Some(id) => {
                let reference = format!("#{id}");
                self.id_attribute = Some(attribute.into());
                reference
            }
            None => String::new(),
        }
    }
}

/// Token produced by the security token provider.
#[derive(Clone, Debug, PartialEq)]
pub struct SecurityToken {
    pub token_type: String,
    pub token_id: Option<String>,
    pub token_value: TokenElement,
}

/// `SecurityTokenReference` pointing to an issued token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenReference {
    /// Reference value (token ID or key identifier).
    pub value: String,
    /// Value type of the referenced token.
    pub value_type: Option<String>,
}
