//! Port for issuing and validating signed access tokens.
//!
//! Tokens are self-contained: validation needs only the signing key and the
//! current time, never a store lookup. There is no revocation list; a token
//! stays valid until it expires.

use crate::domain::{AccessToken, TokenClaims, User};

use super::define_port_error;

define_port_error! {
    /// Reasons a token cannot be issued or accepted.
    pub enum TokenError {
        /// The token is not a well-formed signed token.
        Malformed { message: String } => "token is malformed: {message}",
        /// The signature does not match the signing key.
        InvalidSignature => "token signature is invalid",
        /// The token's expiry has passed.
        Expired => "token has expired",
        /// Encoding a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token asserting the user's username and role.
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError>;

    /// Verify a token and return its claims.
    fn validate(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
