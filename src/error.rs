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

use crate::credential::error::CredentialProviderError;
use crate::sts::error::WsTrustError;

#[derive(Debug, Error)]
pub enum StsCoreError {
    #[error(transparent)]
    CredentialProvider {
        #[from]
        source: CredentialProviderError,
    },

    /// Configuration loading error.
    #[error(transparent)]
    Config {
        #[from]
        source: eyre::Report,
    },

    #[error(transparent)]
    WsTrust {
        #[from]
        source: WsTrustError,
    },
}

/// Error of the generated builders.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuilderError {
    /// Uninitialized field.
    #[error("{0}")]
    UninitializedField(&'static str),
    /// Custom validation error.
    #[error("{0}")]
    Validation(String),
}

impl From<String> for BuilderError {
    fn from(s: String) -> Self {
        Self::Validation(s)
    }
}

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    fn from(ufe: derive_builder::UninitializedFieldError) -> Self {
        Self::UninitializedField(ufe.field_name())
    }
}
