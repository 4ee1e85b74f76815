//! Account registration and credential checks.
//!
//! Implements the [`CredentialStore`] driving port over a [`UserRepository`]
//! and a [`PasswordHasher`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{
    CredentialStore, PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, NewUser, Registration, User};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const REGISTER_FAILED: &str = "Failed to register user";
const LOOKUP_FAILED: &str = "Failed to look up user";

fn map_persistence_error(message: &'static str) -> impl FnOnce(UserPersistenceError) -> Error {
    move |err| match err {
        UserPersistenceError::DuplicateUsername { username } => {
            Error::invalid_request(format!("username already exists: {username}"))
        }
        other => {
            error!(error = %other, "user repository failure");
            Error::internal(message)
        }
    }
}

fn map_hash_error(message: &'static str) -> impl FnOnce(PasswordHashError) -> Error {
    move |err| {
        error!(error = %err, "password hashing failure");
        Error::internal(message)
    }
}

/// Credential service implementing [`CredentialStore`].
#[derive(Clone)]
pub struct CredentialService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> CredentialService<U, H> {
    /// Create a service over the given account store and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> CredentialStore for CredentialService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let credentials = registration.credentials();
        let password_hash = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hash_error(REGISTER_FAILED))?;
        let new_user = NewUser {
            username: credentials.username().to_owned(),
            password_hash,
            role: registration.role(),
        };
        self.users
            .insert(&new_user)
            .await
            .map_err(map_persistence_error(REGISTER_FAILED))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_persistence_error(LOOKUP_FAILED))
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self.find_by_username(credentials.username()).await? else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(map_hash_error(LOOKUP_FAILED))?;
        if matches {
            Ok(user)
        } else {
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
