//! Patient model
//!
//! Patients live in the append-only registry. A row is written once, when the
//! patient is created, and never changed afterwards.

use super::ids::PatientId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Oldest age the generator assigns
pub const MAX_AGE: u8 = 120;

/// Administrative sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "U")]
    Unknown,
}

impl Sex {
    /// Every value, in sampling order
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Unknown];

    /// Single-letter code used in the tables
    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "U",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            "U" => Ok(Sex::Unknown),
            other => Err(format!("Invalid sex code '{other}'. Expected M, F or U")),
        }
    }
}

/// A registry patient
///
/// Field order matches the `patient_id, age, sex` column order of the
/// registry file and the daily snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: PatientId,
    pub age: u8,
    pub sex: Sex,
}

impl Patient {
    /// Creates a patient row
    pub fn new(patient_id: PatientId, age: u8, sex: Sex) -> Self {
        Self {
            patient_id,
            age,
            sex,
        }
    }
}
