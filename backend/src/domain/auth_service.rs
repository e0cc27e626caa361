//! Account services: registration, credential checks and profile reads.
//!
//! Unknown emails and wrong passwords fail with the same `unauthorized`
//! message so callers cannot probe which accounts exist.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, RegistrationService, UserPersistenceError,
    UserProfileQuery, UserRepository,
};
use crate::domain::{Error, LoginCredentials, RegistrationDetails, User, UserId};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const EMAIL_TAKEN: &str = "Email already registered";

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_TAKEN),
    }
}

fn map_hasher_error(err: PasswordHasherError) -> Error {
    error!(error = %err, "password hasher failed");
    Error::internal(err.to_string())
}

/// Account service implementing the login, registration and profile ports.
#[derive(Clone)]
pub struct AuthService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> AuthService<U, H> {
    /// Create the service from its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

#[async_trait]
impl<U, H> LoginService for AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        info!(user_id = %user.id(), "user authenticated");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> RegistrationService for AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, details: &RegistrationDetails) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(details.email())
            .await
            .map_err(map_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict(EMAIL_TAKEN));
        }

        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::register(
            details.email().clone(),
            details.name().clone(),
            password_hash,
            self.clock.utc(),
        );
        self.users
            .create(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> UserProfileQuery for AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
