//! Driven port for one-way password hashing.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::PasswordHash;

define_port_error! {
    /// Failures raised while hashing or verifying passwords.
    pub enum PasswordHasherError {
        /// Hashing could not complete.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be checked.
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// Hashes new passwords and checks candidates against stored hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Return whether `password` matches `hash`.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHasherError>;
}
