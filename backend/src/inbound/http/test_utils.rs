//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::Duration;
use mockable::DefaultClock;

use crate::domain::ports::TokenService;
use crate::domain::{
    CredentialService, PasswordHash, PatientService, Role, TokenClaims, User, UserId,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::crypto::Argon2PasswordHasher;
use crate::outbound::memory::{InMemoryPatientRepository, InMemoryUserRepository};
use crate::outbound::token::{JwtTokenService, TOKEN_SECRET_MIN_LEN, TokenSecret};

/// Token service with a fixed secret and the wall clock.
pub struct TestTokens {
    service: Arc<JwtTokenService>,
}

impl TestTokens {
    pub fn new() -> Self {
        let secret = TokenSecret::new(vec![42_u8; TOKEN_SECRET_MIN_LEN]);
        Self {
            service: Arc::new(JwtTokenService::new(
                &secret,
                Duration::hours(1),
                Arc::new(DefaultClock),
            )),
        }
    }

    /// Issue a token for a user that need not exist in any store.
    pub fn issue(&self, username: &str, role: Role) -> String {
        let user = User::new(UserId::new(1), username, PasswordHash::new("unused"), role);
        self.service
            .issue(&user)
            .expect("test token issues")
            .into_inner()
    }

    pub fn validate(&self, token: &str) -> TokenClaims {
        self.service.validate(token).expect("test token validates")
    }

    pub fn service(&self) -> Arc<dyn TokenService> {
        self.service.clone()
    }
}

/// HTTP state over fresh in-memory stores, signing with `tokens`.
pub fn test_state(tokens: &TestTokens) -> HttpState {
    let credentials = CredentialService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let patients = PatientService::new(Arc::new(InMemoryPatientRepository::new()));
    HttpState::new(Arc::new(credentials), Arc::new(patients), tokens.service())
}
