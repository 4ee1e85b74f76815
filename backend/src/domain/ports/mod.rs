//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`CredentialStore`], [`PatientWorkflow`]) are called by
//! inbound adapters. Driven ports ([`UserRepository`], [`PatientRepository`],
//! [`PasswordHasher`], [`TokenService`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod password_hasher;
mod patient_repository;
mod patient_workflow;
mod token_service;
mod user_repository;

pub use credential_store::CredentialStore;
#[cfg(test)]
pub use credential_store::MockCredentialStore;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::{PatientRepository, PatientRepositoryError};
#[cfg(test)]
pub use patient_workflow::MockPatientWorkflow;
pub use patient_workflow::PatientWorkflow;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
