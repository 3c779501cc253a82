use serde::{Deserialize, Serialize};

use super::Patient;

/// What the read endpoints expose of a patient.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub first_name: String,
    pub last_name: String,
    pub description: String,
}

impl From<Patient> for PatientSummary {
    fn from(patient: Patient) -> Self {
        Self {
            first_name: patient.first_name,
            last_name: patient.last_name,
            description: patient.description,
        }
    }
}
