//! Encounter model

use super::ids::{EncounterId, PatientId};
use super::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encounter severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Acuity {
    Low,
    Medium,
    High,
}

impl Acuity {
    /// Lowercase label used in the tables
    pub fn as_str(self) -> &'static str {
        match self {
            Acuity::Low => "low",
            Acuity::Medium => "medium",
            Acuity::High => "high",
        }
    }
}

impl fmt::Display for Acuity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Acuity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Acuity::Low),
            "medium" => Ok(Acuity::Medium),
            "high" => Ok(Acuity::High),
            other => Err(format!("Invalid acuity '{other}'")),
        }
    }
}

/// One hospital encounter
///
/// `discharge_time >= admit_time` holds for every generated encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub encounter_id: EncounterId,
    pub patient_id: PatientId,
    #[serde(with = "timestamp")]
    pub admit_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub discharge_time: NaiveDateTime,
    pub scenario: String,
    pub acuity: Acuity,
}

impl Encounter {
    /// Length of stay in fractional hours
    pub fn los_hours(&self) -> f64 {
        (self.discharge_time - self.admit_time).num_seconds() as f64 / 3600.0
    }

    /// Whether `ts` falls inside the admit/discharge window, bounds included
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.admit_time <= ts && ts <= self.discharge_time
    }
}
