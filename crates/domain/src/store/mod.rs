/// SQL schema
pub mod schema;

/// SQLite-backed store
pub mod sqlite;

use std::{path::Path, sync::Arc};

use async_trait::async_trait;

use crate::errors::Error;
use crate::medications::{Medication, MedicationChanges, NewMedication};
use crate::patients::{NewPatient, Patient, PatientChanges};

pub use sqlite::SqliteStore;

/// Record storage for patients and their medications.
///
/// Lookups by id return `Error::NotFound` when no row matches. Every mutating
/// call commits before returning.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_patients(&self) -> Result<Vec<Patient>, Error>;

    async fn get_patient(&self, id: i64) -> Result<Patient, Error>;

    /// Returns the assigned id.
    async fn create_patient(&self, input: NewPatient) -> Result<i64, Error>;

    async fn update_patient(&self, id: i64, changes: PatientChanges) -> Result<Patient, Error>;

    /// Medications owned by the patient survive with their owner cleared.
    async fn delete_patient(&self, id: i64) -> Result<(), Error>;

    async fn list_medications(&self) -> Result<Vec<Medication>, Error>;

    async fn get_medication(&self, id: i64) -> Result<Medication, Error>;

    /// Fails with `Error::NotFound` if the patient does not exist; nothing is
    /// inserted in that case.
    async fn create_medication(&self, patient_id: i64, input: NewMedication)
        -> Result<i64, Error>;

    async fn update_medication(
        &self,
        id: i64,
        changes: MedicationChanges,
    ) -> Result<Medication, Error>;

    async fn delete_medication(&self, id: i64) -> Result<(), Error>;
}

pub fn init<P: AsRef<Path>>(path: P) -> Result<Arc<Box<dyn Store>>, Error> {
    let store = SqliteStore::open(path)?;
    Ok(Arc::new(Box::new(store)))
}

pub fn init_in_memory() -> Result<Arc<Box<dyn Store>>, Error> {
    let store = SqliteStore::open_in_memory()?;
    Ok(Arc::new(Box::new(store)))
}
