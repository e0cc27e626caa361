//! bcrypt-backed `PasswordHasher`.
//!
//! bcrypt is CPU bound, so both operations run on the blocking pool. The
//! request trace id is re-entered there so failures logged by the worker
//! stay correlated.

use std::ops::RangeInclusive;

use async_trait::async_trait;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, TraceId};

/// Cost used when no override is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

const SUPPORTED_COSTS: RangeInclusive<u32> = 4..=31;

/// Hashes passwords with bcrypt at a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Build a hasher with an explicit cost.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError::Hash`] when `cost` is outside `4..=31`.
    pub fn new(cost: u32) -> Result<Self, PasswordHasherError> {
        if !SUPPORTED_COSTS.contains(&cost) {
            return Err(PasswordHasherError::hash(format!(
                "bcrypt cost must be between {} and {}, got {cost}",
                SUPPORTED_COSTS.start(),
                SUPPORTED_COSTS.end()
            )));
        }
        Ok(Self { cost })
    }

    /// Configured cost factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

async fn run_blocking<T, F>(
    work: F,
    on_join_error: fn(String) -> PasswordHasherError,
) -> Result<T, PasswordHasherError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHasherError> + Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, work),
        None => work(),
    })
    .await
    .map_err(|err| on_join_error(err.to_string()))?
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let cost = self.cost;
        let password = Zeroizing::new(password.to_owned());
        run_blocking(
            move || {
                debug!(cost, "hashing password");
                bcrypt::hash(password.as_str(), cost)
                    .map(PasswordHash::new)
                    .map_err(|err| PasswordHasherError::hash(err.to_string()))
            },
            |message| PasswordHasherError::hash(message),
        )
        .await
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        run_blocking(
            move || {
                bcrypt::verify(password.as_str(), &encoded)
                    .map_err(|err| PasswordHasherError::verify(err.to_string()))
            },
            |message| PasswordHasherError::verify(message),
        )
        .await
    }
}
