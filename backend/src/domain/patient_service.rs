//! Patient record workflow.
//!
//! Implements the [`PatientWorkflow`] driving port over a
//! [`PatientRepository`]. Each operation reports one fixed client-facing
//! message per failure kind; store details go to the log only.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{PatientRepository, PatientRepositoryError, PatientWorkflow};
use crate::domain::{
    Error, Patient, PatientId, PatientPayload, PatientValidationError, validate_age,
};

const INVALID_DATA: &str = "Invalid data";
const AGE_OUT_OF_RANGE: &str = "Age must be between 1 and 100";
const PATIENT_NOT_FOUND: &str = "Patient not found";
const CREATE_FAILED: &str = "Failed to create patient";
const LIST_FAILED: &str = "Failed to retrieve patients";
const UPDATE_FAILED: &str = "Failed to update patient";
const DELETE_FAILED: &str = "Failed to delete patient";

fn store_failure(
    operation: &'static str,
    message: &'static str,
) -> impl FnOnce(PatientRepositoryError) -> Error {
    move |err| {
        error!(operation, error = %err, "patient repository failure");
        Error::internal(message)
    }
}

fn invalid_data(err: PatientValidationError) -> Error {
    Error::invalid_request(INVALID_DATA)
        .with_details(serde_json::json!({ "reason": err.to_string() }))
}

/// Patient service implementing [`PatientWorkflow`].
#[derive(Clone)]
pub struct PatientService<R> {
    patients: Arc<R>,
}

impl<R> PatientService<R> {
    /// Create a service over the given repository.
    pub fn new(patients: Arc<R>) -> Self {
        Self { patients }
    }
}

impl<R> PatientService<R>
where
    R: PatientRepository,
{
    /// Look a record up, folding store failures into `NotFound`.
    async fn existing(&self, id: PatientId) -> Result<Patient, Error> {
        match self.patients.find_by_id(id).await {
            Ok(Some(patient)) => Ok(patient),
            Ok(None) => Err(Error::not_found(PATIENT_NOT_FOUND)),
            Err(err) => {
                warn!(patient_id = %id, error = %err, "patient lookup failed");
                Err(Error::not_found(PATIENT_NOT_FOUND))
            }
        }
    }
}

#[async_trait]
impl<R> PatientWorkflow for PatientService<R>
where
    R: PatientRepository,
{
    async fn create(&self, body: &[u8]) -> Result<Patient, Error> {
        let draft = PatientPayload::parse(body).map_err(invalid_data)?.into_draft();
        self.patients
            .create(&draft)
            .await
            .map_err(store_failure("create", CREATE_FAILED))
    }

    async fn list(&self) -> Result<Vec<Patient>, Error> {
        self.patients
            .list()
            .await
            .map_err(store_failure("list", LIST_FAILED))
    }

    async fn fetch(&self, id: PatientId) -> Result<Patient, Error> {
        self.existing(id).await
    }

    async fn update(&self, id: PatientId, body: &[u8]) -> Result<Patient, Error> {
        let stored = self.existing(id).await?;
        let updated = PatientPayload::parse(body).map_err(invalid_data)?.apply_to(stored);
        validate_age(updated.age).map_err(|_| Error::invalid_request(AGE_OUT_OF_RANGE))?;
        self.patients
            .replace(&updated)
            .await
            .map_err(store_failure("update", UPDATE_FAILED))?
            .ok_or_else(|| Error::not_found(PATIENT_NOT_FOUND))
    }

    async fn delete(&self, id: PatientId) -> Result<(), Error> {
        self.existing(id).await?;
        let deleted = self
            .patients
            .delete(id)
            .await
            .map_err(store_failure("delete", DELETE_FAILED))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(PATIENT_NOT_FOUND))
        }
    }
}

#[cfg(test)]
#[path = "patient_service_tests.rs"]
mod tests;
