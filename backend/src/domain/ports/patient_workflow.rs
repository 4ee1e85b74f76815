//! Driving port for the patient record use-cases.
//!
//! Write operations take the raw request body so the workflow controls the
//! order of checks: an update looks the record up before it reads the body.

use async_trait::async_trait;

use crate::domain::{Error, Patient, PatientId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientWorkflow: Send + Sync {
    /// Create a record from a JSON body. No age check is applied.
    async fn create(&self, body: &[u8]) -> Result<Patient, Error>;

    /// Every record in ascending id order.
    async fn list(&self) -> Result<Vec<Patient>, Error>;

    /// A single record, or `NotFound`.
    async fn fetch(&self, id: PatientId) -> Result<Patient, Error>;

    /// Overlay a JSON body onto an existing record, then check its age.
    async fn update(&self, id: PatientId, body: &[u8]) -> Result<Patient, Error>;

    /// Remove a record, or report `NotFound`.
    async fn delete(&self, id: PatientId) -> Result<(), Error>;
}
