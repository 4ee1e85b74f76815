//! PostgreSQL-backed `PatientRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PatientRepository, PatientRepositoryError};
use crate::domain::{Patient, PatientDraft, PatientId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPatientRow, PatientRow, PatientUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::patients;

/// Diesel-backed implementation of the [`PatientRepository`] port.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PatientRepositoryError {
    map_basic_pool_error(error, PatientRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PatientRepositoryError {
    map_basic_diesel_error(
        error,
        PatientRepositoryError::query,
        PatientRepositoryError::connection,
    )
}

fn row_to_patient(row: PatientRow) -> Patient {
    Patient {
        id: PatientId::new(row.id),
        name: row.name,
        age: row.age,
        gender: row.gender,
        note: row.note,
    }
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPatientRow {
            name: draft.name.as_str(),
            age: draft.age,
            gender: draft.gender.as_str(),
            note: draft.note.as_str(),
        };

        diesel::insert_into(patients::table)
            .values(&new_row)
            .returning(PatientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_patient)
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PatientRow> = patients::table
            .order(patients::id.asc())
            .select(PatientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_patient).collect())
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PatientRow> = patients::table
            .filter(patients::id.eq(id.get()))
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_patient))
    }

    async fn replace(&self, patient: &Patient) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = PatientUpdate {
            name: patient.name.as_str(),
            age: patient.age,
            gender: patient.gender.as_str(),
            note: patient.note.as_str(),
        };

        let row: Option<PatientRow> = diesel::update(patients::table.find(patient.id.get()))
            .set(&update)
            .returning(PatientRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_patient))
    }

    async fn delete(&self, id: PatientId) -> Result<bool, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(patients::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
