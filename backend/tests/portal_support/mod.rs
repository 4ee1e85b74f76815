//! Shared wiring for portal integration tests: in-memory stores behind the
//! real services, token signing with a fixed secret.

use std::sync::Arc;

use chrono::Duration;
use mockable::DefaultClock;
use portal::domain::{CredentialService, PatientService};
use portal::inbound::http::health::HealthState;
use portal::inbound::http::state::HttpState;
use portal::outbound::crypto::Argon2PasswordHasher;
use portal::outbound::memory::{InMemoryPatientRepository, InMemoryUserRepository};
use portal::outbound::token::{JwtTokenService, TOKEN_SECRET_MIN_LEN, TokenSecret};

/// HTTP state over empty in-memory stores.
pub fn portal_state() -> HttpState {
    let secret = TokenSecret::new(vec![7_u8; TOKEN_SECRET_MIN_LEN]);
    let tokens = JwtTokenService::new(&secret, Duration::hours(1), Arc::new(DefaultClock));
    let credentials = CredentialService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let patients = PatientService::new(Arc::new(InMemoryPatientRepository::new()));
    HttpState::new(Arc::new(credentials), Arc::new(patients), Arc::new(tokens))
}

/// Health state that reports ready.
pub fn ready_health() -> HealthState {
    let health = HealthState::new();
    health.mark_ready();
    health
}

/// Build a test service with the full route table and trace middleware.
macro_rules! portal_app {
    () => {{
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(crate::portal_support::portal_state()))
                .app_data(actix_web::web::Data::new(crate::portal_support::ready_health()))
                .wrap(portal::Trace)
                .configure(portal::inbound::http::configure),
        )
        .await
    }};
}
