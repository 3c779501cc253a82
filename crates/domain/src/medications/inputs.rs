use chrono::{NaiveDate, NaiveTime};
use derive_new::new;
use serde::{Deserialize, Serialize};

use super::model::{Medication, Unit, DESCRIPTION_MAX_LEN};
use crate::errors::Error;
use crate::patients::model::check_len;

/// Body of `POST /patients/{id}`. Every field is required.
#[derive(Clone, Debug, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct NewMedication {
    pub description: String,
    pub dosage: i32,
    pub unit: Unit,
    pub time: NaiveTime,
    pub creation_date: NaiveDate,
    pub modify_date: NaiveDate,
}

impl NewMedication {
    pub fn validate(&self) -> Result<(), Error> {
        check_len("description", &self.description, DESCRIPTION_MAX_LEN)
    }
}

/// Body of `PUT /patients/{id}/{medId}`. Absent fields keep their stored value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationChanges {
    pub description: Option<String>,
    pub dosage: Option<i32>,
    pub unit: Option<Unit>,
    pub time: Option<NaiveTime>,
}

impl MedicationChanges {
    pub fn apply(self, medication: &mut Medication) {
        if let Some(description) = self.description {
            medication.description = description;
        }
        if let Some(dosage) = self.dosage {
            medication.dosage = dosage;
        }
        if let Some(unit) = self.unit {
            medication.unit = unit;
        }
        if let Some(time) = self.time {
            medication.time = time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_medication_parses_time_of_day() {
        let body = r#"{
            "description": "ibuprofen",
            "dosage": 200,
            "unit": "mg",
            "time": "08:30:00",
            "creationDate": "2024-03-01",
            "modifyDate": "2024-03-01"
        }"#;
        let input: NewMedication = serde_json::from_str(body).unwrap();
        assert_eq!(input.unit, Unit::Mg);
        assert_eq!(input.time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn test_new_medication_rejects_string_dosage() {
        let body = r#"{
            "description": "ibuprofen",
            "dosage": "two hundred",
            "unit": "mg",
            "time": "08:30:00",
            "creationDate": "2024-03-01",
            "modifyDate": "2024-03-01"
        }"#;
        assert!(serde_json::from_str::<NewMedication>(body).is_err());
    }

    #[test]
    fn test_apply_keeps_untouched_fields() {
        let mut medication = Medication {
            id: 1,
            description: "ibuprofen".to_string(),
            dosage: 200,
            unit: Unit::Mg,
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            creation_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            modify_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            patient_id: Some(4),
        };

        let changes: MedicationChanges = serde_json::from_str(r#"{"dosage": 400}"#).unwrap();
        changes.apply(&mut medication);

        assert_eq!(medication.dosage, 400);
        assert_eq!(medication.description, "ibuprofen");
        assert_eq!(medication.unit, Unit::Mg);
        assert_eq!(medication.patient_id, Some(4));
    }
}
