//! Per-day table files
//!
//! A generated day lives in `data_dir/{raw|sample}/YYYY-MM-DD/` and holds
//! `patients.csv`, `encounters.csv`, `vitals.csv` and `manifest.json`.

pub mod manifest;
pub mod reader;
pub mod writer;

pub use manifest::DayManifest;
pub use reader::{read_day, RawDay, RawTable};
pub use writer::{write_day, WrittenDay};

use crate::domain::{Encounter, Patient, VitalEvent};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Active patient snapshot file
pub const PATIENTS_FILE: &str = "patients.csv";
/// Encounter table file
pub const ENCOUNTERS_FILE: &str = "encounters.csv";
/// Vital events table file
pub const VITALS_FILE: &str = "vitals.csv";
/// Day manifest file
pub const MANIFEST_FILE: &str = "manifest.json";

/// The three per-day tables in load order
pub const DAY_TABLE_FILES: [&str; 3] = [PATIENTS_FILE, ENCOUNTERS_FILE, VITALS_FILE];

/// Output tree a day is written into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetMode {
    Raw,
    Sample,
}

impl DatasetMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetMode::Raw => "raw",
            DatasetMode::Sample => "sample",
        }
    }
}

impl fmt::Display for DatasetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(DatasetMode::Raw),
            "sample" => Ok(DatasetMode::Sample),
            other => Err(format!("Invalid mode '{other}'. Expected 'raw' or 'sample'")),
        }
    }
}

/// Folder holding one day's tables
pub fn day_dir(data_dir: &Path, mode: DatasetMode, date: NaiveDate) -> PathBuf {
    data_dir
        .join(mode.as_str())
        .join(date.format("%Y-%m-%d").to_string())
}

/// One generated day, ready to be written
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayTables {
    pub patients: Vec<Patient>,
    pub encounters: Vec<Encounter>,
    pub vitals: Vec<VitalEvent>,
}
