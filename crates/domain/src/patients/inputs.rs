use chrono::NaiveDate;
use derive_new::new;
use serde::{Deserialize, Serialize};

use super::model::{validate_fields, Gender, Patient};
use crate::errors::Error;

/// Body of `POST /patients`. Every field is required.
#[derive(Clone, Debug, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub description: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub modify_date: NaiveDate,
}

impl NewPatient {
    pub fn validate(&self) -> Result<(), Error> {
        validate_fields(&self.description, &self.first_name, &self.last_name)
    }
}

/// Body of `PUT /patients/{id}`. Absent fields keep their stored value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
}

impl PatientChanges {
    pub fn apply(self, patient: &mut Patient) {
        if let Some(first_name) = self.first_name {
            patient.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            patient.last_name = last_name;
        }
        if let Some(description) = self.description {
            patient.description = description;
        }
        if let Some(gender) = self.gender {
            patient.gender = gender;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            patient.date_of_birth = date_of_birth;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_requires_every_field() {
        let body = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "description": "asthma",
            "gender": "female",
            "dateOfBirth": "1815-12-10"
        }"#;
        let err = serde_json::from_str::<NewPatient>(body).unwrap_err();
        assert!(err.to_string().contains("modifyDate"));
    }

    #[test]
    fn test_new_patient_rejects_bad_date() {
        let body = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "description": "asthma",
            "gender": "female",
            "dateOfBirth": "10/12/1815",
            "modifyDate": "2024-01-01"
        }"#;
        assert!(serde_json::from_str::<NewPatient>(body).is_err());
    }

    #[test]
    fn test_apply_only_overwrites_present_fields() {
        let mut patient = Patient {
            id: 7,
            description: "asthma".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            modify_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };

        let changes: PatientChanges =
            serde_json::from_str(r#"{"lastName": "King", "gender": "unknown"}"#).unwrap();
        changes.apply(&mut patient);

        assert_eq!(patient.last_name, "King");
        assert_eq!(patient.gender, Gender::Unknown);
        assert_eq!(patient.first_name, "Ada");
        assert_eq!(patient.description, "asthma");
        assert_eq!(
            patient.date_of_birth,
            NaiveDate::from_ymd_opt(1815, 12, 10).unwrap()
        );
    }

    #[test]
    fn test_empty_changes_are_a_no_op() {
        let changes: PatientChanges = serde_json::from_str("{}").unwrap();
        let mut patient = Patient {
            id: 1,
            description: String::new(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            gender: Gender::Male,
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            modify_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        };
        let before = patient.clone();
        changes.apply(&mut patient);
        assert_eq!(patient, before);
    }
}
