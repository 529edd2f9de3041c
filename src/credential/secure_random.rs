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

//! Secure random source of the password salts.
//!
//! The generator is periodically re-seeded to bound the amount of output
//! produced by a single seed. Renewal is lazy: it is checked whenever a value
//! is drawn and is skipped when another thread currently holds the
//! generator.

use chrono::{DateTime, TimeDelta, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fmt;
use std::sync::{Arc, Mutex, TryLockError};
use tracing::{debug, error};

use crate::clock::Clock;
use crate::config::{Config, SecureRandomAlgo};
use crate::credential::error::PasswordHashError;

/// Source of freshly seeded generators.
#[cfg_attr(test, mockall::automock)]
pub trait SeedSource: Send + Sync {
    /// Create a new generator.
    fn seeded_rng(&self) -> Result<StdRng, PasswordHashError>;
}

/// Generator seeded from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    fn seeded_rng(&self) -> Result<StdRng, PasswordHashError> {
        StdRng::try_from_os_rng().map_err(|err| PasswordHashError::SecureRandom(err.to_string()))
    }
}

struct Generator {
    rng: StdRng,
    created_at: DateTime<Utc>,
}

pub struct SecureRandomProvider {
    generator: Mutex<Generator>,
    renewal_interval: Option<TimeDelta>,
    seed_source: Arc<dyn SeedSource>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SecureRandomProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureRandomProvider")
            .field("renewal_interval", &self.renewal_interval)
            .finish_non_exhaustive()
    }
}

impl SecureRandomProvider {
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, PasswordHashError> {
        let seed_source: Arc<dyn SeedSource> = match config.credential.secure_random_algorithm {
            SecureRandomAlgo::Std => Arc::new(OsSeedSource),
        };
        Self::with_seed_source(
            config.credential.secure_random_renewal_interval,
            seed_source,
            clock,
        )
    }

    pub fn with_seed_source(
        renewal_interval: Option<TimeDelta>,
        seed_source: Arc<dyn SeedSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PasswordHashError> {
        let generator = Generator {
            rng: seed_source.seeded_rng()?,
            created_at: clock.now(),
        };
        Ok(Self {
            generator: Mutex::new(generator),
            renewal_interval,
            seed_source,
            clock,
        })
    }

    /// Re-seed the generator when the renewal interval has elapsed.
    ///
    /// Returns whether the generator was renewed. When the generator is
    /// currently held by another caller the renewal is skipped.
    pub fn renew_if_stale(&self) -> Result<bool, PasswordHashError> {
        let Some(interval) = self.renewal_interval else {
            return Ok(false);
        };
        let mut generator = match self.generator.try_lock() {
            Ok(generator) => generator,
            Err(TryLockError::WouldBlock) => return Ok(false),
            Err(TryLockError::Poisoned(_)) => return Err(PasswordHashError::Poisoned),
        };
        let now = self.clock.now();
        if now.signed_duration_since(generator.created_at) < interval {
            return Ok(false);
        }
        generator.rng = self.seed_source.seeded_rng().inspect_err(|err| {
            error!("secure random generator renewal failed: {err}");
        })?;
        generator.created_at = now;
        debug!("secure random generator renewed");
        Ok(true)
    }

    /// Draw a random unsigned integer.
    pub fn next_u64(&self) -> Result<u64, PasswordHashError> {
        self.renew_if_stale()?;
        let mut generator = self
            .generator
            .lock()
            .map_err(|_| PasswordHashError::Poisoned)?;
        Ok(generator.rng.random())
    }

    /// Generate a numeric password salt.
    pub fn generate_salt(&self) -> Result<String, PasswordHashError> {
        Ok(self.next_u64()?.to_string())
    }
}
