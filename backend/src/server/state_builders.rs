//! Builders wiring domain services onto the configured storage adapters.

use std::sync::Arc;

use mockable::DefaultClock;
use portal::domain::ports::{CredentialStore, PatientWorkflow, TokenService};
use portal::domain::{CredentialService, PatientService};
use portal::inbound::http::state::HttpState;
use portal::outbound::crypto::Argon2PasswordHasher;
use portal::outbound::memory::{InMemoryPatientRepository, InMemoryUserRepository};
use portal::outbound::persistence::{DieselPatientRepository, DieselUserRepository};
use portal::outbound::token::JwtTokenService;

use super::ServerConfig;

fn build_credentials(config: &ServerConfig) -> Arc<dyn CredentialStore> {
    let hasher = Arc::new(Argon2PasswordHasher::new());
    match &config.db_pool {
        Some(pool) => Arc::new(CredentialService::new(
            Arc::new(DieselUserRepository::new(pool.clone())),
            hasher,
        )),
        None => Arc::new(CredentialService::new(
            Arc::new(InMemoryUserRepository::new()),
            hasher,
        )),
    }
}

fn build_patients(config: &ServerConfig) -> Arc<dyn PatientWorkflow> {
    match &config.db_pool {
        Some(pool) => Arc::new(PatientService::new(Arc::new(DieselPatientRepository::new(
            pool.clone(),
        )))),
        None => Arc::new(PatientService::new(Arc::new(InMemoryPatientRepository::new()))),
    }
}

fn build_tokens(config: &ServerConfig) -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(
        &config.token_secret,
        config.token_ttl,
        Arc::new(DefaultClock),
    ))
}

/// Build the HTTP state shared by every worker.
///
/// In-memory stores are created once here so all workers see the same
/// records.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    HttpState::new(
        build_credentials(config),
        build_patients(config),
        build_tokens(config),
    )
}
