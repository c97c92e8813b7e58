//! Vital-sign event model

use super::ids::{EncounterId, PatientId};
use super::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physiological measurement kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum VitalType {
    HeartRate,
    RespRate,
    TemperatureC,
    Spo2,
    SystolicBp,
    DiastolicBp,
}

impl VitalType {
    /// Default enabled types, in emission order
    pub const DEFAULT_ENABLED: [VitalType; 6] = [
        VitalType::HeartRate,
        VitalType::RespRate,
        VitalType::TemperatureC,
        VitalType::Spo2,
        VitalType::SystolicBp,
        VitalType::DiastolicBp,
    ];

    /// Table label
    pub fn as_str(self) -> &'static str {
        match self {
            VitalType::HeartRate => "heart_rate",
            VitalType::RespRate => "resp_rate",
            VitalType::TemperatureC => "temperature_c",
            VitalType::Spo2 => "spo2",
            VitalType::SystolicBp => "systolic_bp",
            VitalType::DiastolicBp => "diastolic_bp",
        }
    }

    /// Fixed unit of measure
    pub fn unit(self) -> &'static str {
        match self {
            VitalType::HeartRate => "bpm",
            VitalType::RespRate => "breaths/min",
            VitalType::TemperatureC => "C",
            VitalType::Spo2 => "%",
            VitalType::SystolicBp | VitalType::DiastolicBp => "mmHg",
        }
    }

    /// Rounds a sampled value to the precision recorded for this type
    pub fn round(self, value: f64) -> f64 {
        match self {
            VitalType::TemperatureC => (value * 10.0).round() / 10.0,
            _ => value.round(),
        }
    }
}

impl fmt::Display for VitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VitalType::DEFAULT_ENABLED
            .into_iter()
            .find(|vt| vt.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown vital type '{s}'"))
    }
}

impl TryFrom<String> for VitalType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Inclusive sampling bounds for one vital type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalRange {
    pub min: f64,
    pub max: f64,
}

impl VitalRange {
    /// Creates a range; callers validate `min <= max`
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether both bounds are finite and ordered
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Who recorded a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalSource {
    Monitor,
    Manual,
}

impl fmt::Display for VitalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalSource::Monitor => f.write_str("monitor"),
            VitalSource::Manual => f.write_str("manual"),
        }
    }
}

/// One vital-sign measurement
///
/// `patient_id` always equals the patient of the referenced encounter, and
/// `event_time` lies within that encounter's window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalEvent {
    pub encounter_id: EncounterId,
    pub patient_id: PatientId,
    #[serde(with = "timestamp")]
    pub event_time: NaiveDateTime,
    pub vital_type: VitalType,
    pub value: f64,
    pub unit: String,
    pub source: VitalSource,
}
