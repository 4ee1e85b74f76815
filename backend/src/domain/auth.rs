//! Authentication primitives: credentials, registrations and token claims.
//!
//! Constructors validate raw string inputs so handlers hand the services
//! well-formed values only.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::domain::Role;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// Role was not `doctor` or `receptionist`.
    UnknownRole(String),
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::UnknownRole(role) => {
                write!(f, "role must be doctor or receptionist, got '{role}'")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

fn normalise_username(username: &str) -> Result<String, CredentialsValidationError> {
    let normalised = username.trim();
    if normalised.is_empty() {
        return Err(CredentialsValidationError::EmptyUsername);
    }
    Ok(normalised.to_owned())
}

fn require_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use portal::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" doc ", "123").unwrap();
/// assert_eq!(creds.username(), "doc");
/// assert_eq!(creds.password(), "123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            username: normalise_username(username)?,
            password: require_password(password)?,
        })
    }

    /// Username suitable for store lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    credentials: LoginCredentials,
    role: Role,
}

impl Registration {
    /// Construct a registration from raw inputs.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{Registration, Role};
    ///
    /// let registration = Registration::try_from_parts("recep", "123", "receptionist").unwrap();
    /// assert_eq!(registration.role(), Role::Receptionist);
    /// ```
    pub fn try_from_parts(
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let credentials = LoginCredentials::try_from_parts(username, password)?;
        let role = role
            .parse::<Role>()
            .map_err(|err| CredentialsValidationError::UnknownRole(err.0))?;
        Ok(Self { credentials, role })
    }

    /// Username and password being registered.
    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Verified payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub username: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

/// Signed access token handed to clients after login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token text, sent verbatim in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}
