//! Port for patient record persistence.
//!
//! A thin CRUD contract: no soft-delete, no versioning, no pagination. Each
//! operation is a single-row statement and relies on the store for atomicity.

use async_trait::async_trait;

use crate::domain::{Patient, PatientDraft, PatientId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by patient repository adapters.
    pub enum PatientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "patient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "patient repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Insert a record and return it with its assigned id.
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, PatientRepositoryError>;

    /// Every record, ordered by ascending id.
    async fn list(&self) -> Result<Vec<Patient>, PatientRepositoryError>;

    /// Fetch one record.
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Overwrite every field of the record with `patient.id`.
    ///
    /// Returns `None` when no such record exists.
    async fn replace(&self, patient: &Patient) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Remove a record. Returns whether a row was deleted.
    async fn delete(&self, id: PatientId) -> Result<bool, PatientRepositoryError>;
}
