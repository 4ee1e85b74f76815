//! Service settings loaded via OrthoConfig.
//!
//! Values come from `PORTAL_*` environment variables, CLI flags or a config
//! file. The token secret is loaded separately; see
//! [`crate::outbound::token::token_secret_from_env`].

use std::net::{Ipv4Addr, SocketAddr};

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use crate::outbound::token::{DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS};

const DEFAULT_PORT: u16 = 8088;

/// Runtime settings for the patient portal server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string. In-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Access token lifetime in seconds.
    pub token_ttl_secs: Option<i64>,
}

impl PortalSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8088`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Return the database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the token lifetime.
    ///
    /// Non-positive values fall back to 24 hours; values above 365 days are
    /// clamped to 365 days.
    pub fn token_ttl(&self) -> Duration {
        let secs = match self.token_ttl_secs {
            Some(secs) if secs > MAX_TOKEN_TTL_SECS => {
                warn!(
                    configured = secs,
                    max = MAX_TOKEN_TTL_SECS,
                    "token TTL too long; clamping"
                );
                MAX_TOKEN_TTL_SECS
            }
            Some(secs) if secs > 0 => secs,
            _ => DEFAULT_TOKEN_TTL_SECS,
        };
        Duration::try_seconds(secs).unwrap_or_else(|| Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> PortalSettings {
        PortalSettings::load_from_iter([OsString::from("portal")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("PORTAL_BIND_ADDR", None::<String>),
            ("PORTAL_DATABASE_URL", None::<String>),
            ("PORTAL_TOKEN_TTL_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8088".parse().expect("addr"));
        assert!(settings.database_url().is_none());
        assert_eq!(settings.token_ttl(), Duration::hours(24));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PORTAL_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "PORTAL_DATABASE_URL",
                Some("postgres://portal@localhost/portal".to_owned()),
            ),
            ("PORTAL_TOKEN_TTL_SECS", Some("600".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000".parse().expect("addr"));
        assert_eq!(
            settings.database_url(),
            Some("postgres://portal@localhost/portal")
        );
        assert_eq!(settings.token_ttl(), Duration::seconds(600));
    }

    #[rstest]
    #[case(Some(0))]
    #[case(Some(-30))]
    #[case(None)]
    fn non_positive_ttl_uses_default(#[case] ttl: Option<i64>) {
        let settings = PortalSettings {
            bind_addr: None,
            database_url: Some("   ".to_owned()),
            token_ttl_secs: ttl,
        };
        assert_eq!(settings.token_ttl(), Duration::seconds(DEFAULT_TOKEN_TTL_SECS));
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    #[case(i64::MAX)]
    #[case(1_000_000_000_000_000)]
    #[case(MAX_TOKEN_TTL_SECS + 1)]
    fn oversized_ttl_is_clamped(#[case] ttl: i64) {
        let settings = PortalSettings {
            bind_addr: None,
            database_url: None,
            token_ttl_secs: Some(ttl),
        };
        assert_eq!(settings.token_ttl(), Duration::days(365));
    }
}
