//! Driving port for account registration and authentication.
//!
//! Inbound adapters call this port to create accounts and check login
//! credentials without knowing how passwords are hashed or where accounts
//! are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Domain use-case port for account management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create an account with a hashed password.
    ///
    /// A taken username yields [`crate::domain::ErrorCode::InvalidRequest`].
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Look an account up by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error>;

    /// Return the account when the password matches its stored hash.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller; both yield [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
