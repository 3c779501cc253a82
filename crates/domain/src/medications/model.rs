use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::patients::model::check_len;

pub const ENTITY: &str = "Medication";

pub const DESCRIPTION_MAX_LEN: usize = 160;

/// Dosage unit
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    G,
    Mg,
    Mcg,
    L,
    Ml,
    Cc,
    Mol,
    Mmol,
}

impl Unit {
    pub const ALL: [Unit; 9] = [
        Unit::Kg,
        Unit::G,
        Unit::Mg,
        Unit::Mcg,
        Unit::L,
        Unit::Ml,
        Unit::Cc,
        Unit::Mol,
        Unit::Mmol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::G => "g",
            Self::Mg => "mg",
            Self::Mcg => "mcg",
            Self::L => "l",
            Self::Ml => "ml",
            Self::Cc => "cc",
            Self::Mol => "mol",
            Self::Mmol => "mmol",
        }
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| Error::validation(format!("unknown unit '{s}'")))
    }
}

impl ToSql for Unit {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Unit {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored medication.
///
/// `patient_id` is `None` once the owning patient has been deleted.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: i64,
    pub description: String,
    pub dosage: i32,
    pub unit: Unit,
    pub time: NaiveTime,
    pub creation_date: NaiveDate,
    pub modify_date: NaiveDate,
    pub patient_id: Option<i64>,
}

impl Medication {
    pub fn validate(&self) -> Result<(), Error> {
        check_len("description", &self.description, DESCRIPTION_MAX_LEN)
    }
}
