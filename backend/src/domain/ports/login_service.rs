//! Driving ports for account use-cases: login, registration and profile.
//!
//! Inbound adapters call these traits to authenticate or enrol users without
//! importing persistence or hashing infrastructure, which keeps handler tests
//! deterministic.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, RegistrationDetails, User, UserId};

/// Authenticate credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the account matching `credentials` or fail with `unauthorized`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Enrol new accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account or fail with `conflict` when the email is taken.
    async fn register(&self, details: &RegistrationDetails) -> Result<User, Error>;
}

/// Read the signed-in account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Fetch the account for a session user id.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}
