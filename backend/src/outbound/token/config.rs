//! Token signing secret parsing and validation.
//!
//! The secret is read from a file named by `TOKEN_SECRET_FILE`. Debug builds
//! fall back to a random per-process secret when the file is unreadable;
//! release builds only do so when `TOKEN_ALLOW_EPHEMERAL` is set, and reject
//! secrets shorter than [`TOKEN_SECRET_MIN_LEN`].

use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
const EPHEMERAL_SECRET_LEN: usize = 64;
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Minimum secret length accepted in release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing secret file.
    Debug,
    /// Release builds require a readable secret of sufficient length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// HMAC secret used to sign access tokens. Zeroed on drop.
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Random secret that lives only as long as the process.
    pub fn ephemeral() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self::new(bytes)
    }

    /// Secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl std::fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenSecret(..)")
    }
}

/// Errors raised while loading the token secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Load the token signing secret from the environment.
///
/// # Examples
///
/// ```rust
/// use portal::outbound::token::{BuildMode, token_secret_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "TOKEN_SECRET_FILE" => Some("/nonexistent/token_secret".to_owned()),
///     _ => None,
/// });
///
/// let secret = token_secret_from_env(&env, BuildMode::Debug).unwrap();
/// assert!(!secret.as_bytes().is_empty());
/// ```
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if mode == BuildMode::Release && length < TOKEN_SECRET_MIN_LEN {
                return Err(TokenConfigError::SecretTooShort {
                    path,
                    length,
                    min_len: TOKEN_SECRET_MIN_LEN,
                });
            }
            Ok(TokenSecret(bytes))
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using ephemeral token secret; tokens will not survive a restart"
                );
                Ok(TokenSecret::ephemeral())
            } else {
                Err(TokenConfigError::SecretRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        if mode.is_debug() {
            return Ok(false);
        }
        return Err(TokenConfigError::MissingEnv {
            name: ALLOW_EPHEMERAL_ENV,
        });
    };

    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for token secret loading.
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn secret_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&vec![b's'; len]).expect("write secret");
        file
    }

    fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    fn missing_path() -> String {
        std::env::temp_dir()
            .join(format!("token-secret-{}", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned()
    }

    #[rstest]
    fn release_reads_secret_file() {
        let file = secret_file(TOKEN_SECRET_MIN_LEN);
        let env = mock_env(HashMap::from([
            (SECRET_FILE_ENV, file.path().to_string_lossy().into_owned()),
            (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
        ]));

        let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret loads");
        assert_eq!(secret.as_bytes(), vec![b's'; TOKEN_SECRET_MIN_LEN].as_slice());
    }

    #[rstest]
    fn release_rejects_short_secret() {
        let file = secret_file(TOKEN_SECRET_MIN_LEN - 1);
        let env = mock_env(HashMap::from([
            (SECRET_FILE_ENV, file.path().to_string_lossy().into_owned()),
            (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
        ]));

        let err = token_secret_from_env(&env, BuildMode::Release).expect_err("too short");
        assert!(matches!(
            err,
            TokenConfigError::SecretTooShort { length, .. } if length == TOKEN_SECRET_MIN_LEN - 1
        ));
    }

    #[rstest]
    fn release_requires_allow_ephemeral_toggle() {
        let env = mock_env(HashMap::new());
        let err = token_secret_from_env(&env, BuildMode::Release).expect_err("missing toggle");
        assert!(matches!(
            err,
            TokenConfigError::MissingEnv {
                name: ALLOW_EPHEMERAL_ENV
            }
        ));
    }

    #[rstest]
    #[case("maybe")]
    #[case("")]
    fn release_rejects_invalid_toggle(#[case] value: &str) {
        let env = mock_env(HashMap::from([(ALLOW_EPHEMERAL_ENV, value.to_owned())]));
        let err = token_secret_from_env(&env, BuildMode::Release).expect_err("invalid toggle");
        assert!(matches!(err, TokenConfigError::InvalidEnv { .. }));
    }

    #[rstest]
    fn release_missing_file_is_rejected_without_ephemeral() {
        let env = mock_env(HashMap::from([
            (SECRET_FILE_ENV, missing_path()),
            (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
        ]));
        let err = token_secret_from_env(&env, BuildMode::Release).expect_err("unreadable");
        assert!(matches!(err, TokenConfigError::SecretRead { .. }));
    }

    #[rstest]
    #[case(BuildMode::Release, "1")]
    #[case(BuildMode::Debug, "0")]
    #[case(BuildMode::Debug, "bogus")]
    fn missing_file_falls_back_to_ephemeral(#[case] mode: BuildMode, #[case] toggle: &str) {
        let env = mock_env(HashMap::from([
            (SECRET_FILE_ENV, missing_path()),
            (ALLOW_EPHEMERAL_ENV, toggle.to_owned()),
        ]));
        let secret = token_secret_from_env(&env, mode).expect("ephemeral secret");
        assert_eq!(secret.as_bytes().len(), EPHEMERAL_SECRET_LEN);
    }

    #[rstest]
    fn debug_accepts_short_secret() {
        let file = secret_file(4);
        let env = mock_env(HashMap::from([(
            SECRET_FILE_ENV,
            file.path().to_string_lossy().into_owned(),
        )]));
        let secret = token_secret_from_env(&env, BuildMode::Debug).expect("short secret");
        assert_eq!(secret.as_bytes().len(), 4);
    }
}
