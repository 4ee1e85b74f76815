//! In-process adapters used when no database URL is configured.
//!
//! State lives for the lifetime of the process. Ids are assigned from 1 and
//! never reused.

mod patient_repository;
mod user_repository;

pub use patient_repository::InMemoryPatientRepository;
pub use user_repository::InMemoryUserRepository;
