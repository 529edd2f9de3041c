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

//! # Security token service core
//!
//! This crate contains the security sensitive core of a WS-Trust Security
//! Token Service together with the credential handling subsystem used to
//! authenticate the callers of such a service.
//!
//! Two independent providers are exposed:
//!
//! - The [credential provider](crate::credential::CredentialProvider)
//!   validates and updates caller credentials. Passwords, HTTP digest
//!   credentials, X.509 certificates, time based one-time passwords and
//!   opaque tokens are supported out of the box. Every credential kind is
//!   handled by a dedicated handler selected from a registry, and custom
//!   handlers may be registered through the
//!   [plugin manager](crate::plugin_manager::PluginManager). Credential
//!   values are persisted as versioned storage records with an effective
//!   and an expiry date in a pluggable credential store.
//!
//! - The [STS provider](crate::sts::StsProvider) drives the WS-Trust
//!   Issue, Renew, Validate and Cancel bindings. It builds the request
//!   context, applies the configured defaults, negotiates the
//!   proof-of-possession key (bearer, symmetric with optional P_SHA1
//!   computed keys, or public key) and finally signs and encrypts the issued
//!   token.
//!
//! XML processing, the actual token format (i.e. SAML assertions), the
//! signature and encryption primitives and the persistence engine are
//! consumed through traits and must be supplied by the hosting service.
//! Business outcomes (an invalid password, an expired token, a broken token
//! signature during validation) are always reported as status values while
//! errors are reserved for configuration and protocol failures.

pub mod clock;
pub mod config;
pub mod credential;
pub mod error;
pub mod plugin_manager;
pub mod provider;
pub mod sts;
