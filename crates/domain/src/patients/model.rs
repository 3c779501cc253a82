use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub const ENTITY: &str = "Patient";

pub const DESCRIPTION_MAX_LEN: usize = 160;
pub const NAME_MAX_LEN: usize = 80;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "unknown" => Ok(Self::Unknown),
            other => Err(Error::validation(format!(
                "unknown gender '{other}', expected one of male, female, unknown"
            ))),
        }
    }
}

impl ToSql for Gender {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Gender {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored patient.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub description: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub modify_date: NaiveDate,
}

impl Patient {
    pub fn validate(&self) -> Result<(), Error> {
        validate_fields(&self.description, &self.first_name, &self.last_name)
    }
}

pub(crate) fn validate_fields(
    description: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), Error> {
    check_len("description", description, DESCRIPTION_MAX_LEN)?;
    check_len("firstName", first_name, NAME_MAX_LEN)?;
    check_len("lastName", last_name, NAME_MAX_LEN)
}

pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<(), Error> {
    if value.chars().count() > max {
        return Err(Error::validation(format!(
            "{field} exceeds {max} characters"
        )));
    }
    Ok(())
}
