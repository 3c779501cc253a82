//! SQLite schema definition.

pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS patient (
    patient_id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT,
    first_name TEXT,
    last_name TEXT,
    gender TEXT CHECK (gender IN ('male', 'female', 'unknown')),
    date_of_birth TEXT,
    modify_date TEXT
);

-- Deleting a patient keeps its medications and clears the owner.
CREATE TABLE IF NOT EXISTS medication (
    medication_id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT,
    dosage INTEGER,
    unit TEXT CHECK (unit IN ('kg', 'g', 'mg', 'mcg', 'l', 'ml', 'cc', 'mol', 'mmol')),
    time TEXT,
    creation_date TEXT,
    modify_date TEXT,
    patient_id INTEGER REFERENCES patient(patient_id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_medication_patient ON medication(patient_id);
"#;
