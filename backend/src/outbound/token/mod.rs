//! HS256 JSON Web Token adapter for the [`TokenService`] port.
//!
//! Expiry is checked against an injected [`Clock`] rather than the system
//! time inside `jsonwebtoken`, with zero leeway.

mod config;

pub use config::{
    BuildMode, TOKEN_SECRET_MIN_LEN, TokenConfigError, TokenSecret, token_secret_from_env,
};

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessToken, Role, TokenClaims, User};

/// Default lifetime of an issued token, in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Longest accepted token lifetime, in seconds (365 days).
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * DEFAULT_TOKEN_TTL_SECS;

/// Wire form of the token payload.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    username: String,
    role: String,
    exp: i64,
}

/// Signs and verifies tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a service signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: &TokenSecret, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::invalid_signature(),
        _ => TokenError::malformed(error.to_string()),
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError> {
        let expires_at = self
            .clock
            .utc()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::signing("token expiry is out of range"))?;
        let claims = JwtClaims {
            username: user.username().to_owned(),
            role: user.role().as_str().to_owned(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<JwtClaims>(token, &self.decoding, &Self::validation())
            .map_err(map_decode_error)?;
        let claims = data.claims;

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::malformed("expiry out of range"))?;
        if self.clock.utc() >= expires_at {
            return Err(TokenError::expired());
        }
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|err| TokenError::malformed(err.to_string()))?;

        Ok(TokenClaims {
            username: claims.username,
            role,
            expires_at,
        })
    }
}
