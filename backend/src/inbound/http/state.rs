//! Shared HTTP adapter state.
//!
//! Handlers and the access guard accept this state via
//! `actix_web::web::Data`, so they depend only on domain ports and remain
//! testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CredentialStore, PatientWorkflow, TokenService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub credentials: Arc<dyn CredentialStore>,
    pub patients: Arc<dyn PatientWorkflow>,
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    /// Bundle the ports used by the HTTP adapter.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        patients: Arc<dyn PatientWorkflow>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            credentials,
            patients,
            tokens,
        }
    }
}
