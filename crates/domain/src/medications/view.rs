use serde::{Deserialize, Serialize};

use super::{Medication, Unit};

/// Listing entry for `GET /medications`.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct MedicationSummary {
    pub description: String,
    pub dosage: i32,
    pub unit: Unit,
}

impl From<Medication> for MedicationSummary {
    fn from(medication: Medication) -> Self {
        Self {
            description: medication.description,
            dosage: medication.dosage,
            unit: medication.unit,
        }
    }
}

/// Single medication read, `GET /patients/{id}/{medId}`.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct MedicationDetail {
    pub description: String,
    pub dosage: i32,
}

impl From<Medication> for MedicationDetail {
    fn from(medication: Medication) -> Self {
        Self {
            description: medication.description,
            dosage: medication.dosage,
        }
    }
}
