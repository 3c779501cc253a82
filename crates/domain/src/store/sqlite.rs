use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{schema::SCHEMA, Store};
use crate::errors::Error;
use crate::medications::{self, Medication, MedicationChanges, NewMedication};
use crate::patients::{self, NewPatient, Patient, PatientChanges};

const PATIENT_COLUMNS: &str =
    "patient_id, description, first_name, last_name, gender, date_of_birth, modify_date";

const MEDICATION_COLUMNS: &str =
    "medication_id, description, dosage, unit, time, creation_date, modify_date, patient_id";

/// Store over a single SQLite connection.
///
/// Each operation holds the connection only for its own duration; the guard
/// is released on return, including on error.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open database at path, creating it and its tables if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, Error> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.conn.lock().map_err(|_| Error::Poisoned)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        description: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        gender: row.get(4)?,
        date_of_birth: row.get(5)?,
        modify_date: row.get(6)?,
    })
}

fn medication_from_row(row: &Row<'_>) -> rusqlite::Result<Medication> {
    Ok(Medication {
        id: row.get(0)?,
        description: row.get(1)?,
        dosage: row.get(2)?,
        unit: row.get(3)?,
        time: row.get(4)?,
        creation_date: row.get(5)?,
        modify_date: row.get(6)?,
        patient_id: row.get(7)?,
    })
}

fn select_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, Error> {
    conn.query_row(
        &format!("SELECT {PATIENT_COLUMNS} FROM patient WHERE patient_id = ?1"),
        [id],
        patient_from_row,
    )
    .optional()
    .map_err(Into::into)
}

fn select_medication(conn: &Connection, id: i64) -> Result<Option<Medication>, Error> {
    conn.query_row(
        &format!("SELECT {MEDICATION_COLUMNS} FROM medication WHERE medication_id = ?1"),
        [id],
        medication_from_row,
    )
    .optional()
    .map_err(Into::into)
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_patients(&self) -> Result<Vec<Patient>, Error> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patient ORDER BY patient_id"
        ))?;
        let rows = stmt.query_map([], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    async fn get_patient(&self, id: i64) -> Result<Patient, Error> {
        let conn = self.conn()?;
        select_patient(&conn, id)?.ok_or_else(|| Error::not_found(patients::ENTITY))
    }

    async fn create_patient(&self, input: NewPatient) -> Result<i64, Error> {
        input.validate()?;
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO patient (
                description, first_name, last_name, gender, date_of_birth, modify_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                input.description,
                input.first_name,
                input.last_name,
                input.gender,
                input.date_of_birth,
                input.modify_date,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn update_patient(&self, id: i64, changes: PatientChanges) -> Result<Patient, Error> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut patient =
            select_patient(&tx, id)?.ok_or_else(|| Error::not_found(patients::ENTITY))?;
        changes.apply(&mut patient);
        patient.modify_date = today();
        patient.validate()?;

        tx.execute(
            r#"
            UPDATE patient SET
                description = ?2,
                first_name = ?3,
                last_name = ?4,
                gender = ?5,
                date_of_birth = ?6,
                modify_date = ?7
            WHERE patient_id = ?1
            "#,
            params![
                patient.id,
                patient.description,
                patient.first_name,
                patient.last_name,
                patient.gender,
                patient.date_of_birth,
                patient.modify_date,
            ],
        )?;
        tx.commit()?;
        Ok(patient)
    }

    async fn delete_patient(&self, id: i64) -> Result<(), Error> {
        let conn = self.conn()?;
        let rows_affected = conn.execute("DELETE FROM patient WHERE patient_id = ?1", [id])?;
        if rows_affected == 0 {
            return Err(Error::not_found(patients::ENTITY));
        }
        Ok(())
    }

    async fn list_medications(&self) -> Result<Vec<Medication>, Error> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {MEDICATION_COLUMNS} FROM medication ORDER BY medication_id"
        ))?;
        let rows = stmt.query_map([], medication_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    async fn get_medication(&self, id: i64) -> Result<Medication, Error> {
        let conn = self.conn()?;
        select_medication(&conn, id)?.ok_or_else(|| Error::not_found(medications::ENTITY))
    }

    async fn create_medication(
        &self,
        patient_id: i64,
        input: NewMedication,
    ) -> Result<i64, Error> {
        input.validate()?;
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let owner_exists = tx
            .query_row(
                "SELECT 1 FROM patient WHERE patient_id = ?1",
                [patient_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !owner_exists {
            return Err(Error::not_found(patients::ENTITY));
        }

        tx.execute(
            r#"
            INSERT INTO medication (
                description, dosage, unit, time, creation_date, modify_date, patient_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                input.description,
                input.dosage,
                input.unit,
                input.time,
                input.creation_date,
                input.modify_date,
                patient_id,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    async fn update_medication(
        &self,
        id: i64,
        changes: MedicationChanges,
    ) -> Result<Medication, Error> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut medication =
            select_medication(&tx, id)?.ok_or_else(|| Error::not_found(medications::ENTITY))?;
        changes.apply(&mut medication);
        medication.modify_date = today();
        medication.validate()?;

        tx.execute(
            r#"
            UPDATE medication SET
                description = ?2,
                dosage = ?3,
                unit = ?4,
                time = ?5,
                modify_date = ?6
            WHERE medication_id = ?1
            "#,
            params![
                medication.id,
                medication.description,
                medication.dosage,
                medication.unit,
                medication.time,
                medication.modify_date,
            ],
        )?;
        tx.commit()?;
        Ok(medication)
    }

    async fn delete_medication(&self, id: i64) -> Result<(), Error> {
        let conn = self.conn()?;
        let rows_affected =
            conn.execute("DELETE FROM medication WHERE medication_id = ?1", [id])?;
        if rows_affected == 0 {
            return Err(Error::not_found(medications::ENTITY));
        }
        Ok(())
    }
}
