//! `PatientRepository` backed by an ordered in-memory map.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{PatientRepository, PatientRepositoryError};
use crate::domain::{Patient, PatientDraft, PatientId};

#[derive(Debug, Default)]
struct PatientTable {
    rows: BTreeMap<PatientId, Patient>,
    last_id: i64,
}

/// In-memory patient store. Listing order follows the id ordering of the map.
#[derive(Debug, Default)]
pub struct InMemoryPatientRepository {
    table: Mutex<PatientTable>,
}

impl InMemoryPatientRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, PatientTable>, PatientRepositoryError> {
        self.table
            .lock()
            .map_err(|_| PatientRepositoryError::query("patient table lock poisoned"))
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, PatientRepositoryError> {
        let mut table = self.lock()?;
        table.last_id += 1;
        let patient = Patient {
            id: PatientId::new(table.last_id),
            name: draft.name.clone(),
            age: draft.age,
            gender: draft.gender.clone(),
            note: draft.note.clone(),
        };
        table.rows.insert(patient.id, patient.clone());
        Ok(patient)
    }

    async fn list(&self) -> Result<Vec<Patient>, PatientRepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn replace(&self, patient: &Patient) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut table = self.lock()?;
        Ok(table.rows.get_mut(&patient.id).map(|stored| {
            *stored = patient.clone();
            stored.clone()
        }))
    }

    async fn delete(&self, id: PatientId) -> Result<bool, PatientRepositoryError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }
}
