//! Domain error types
//!
//! This module defines the error hierarchy for ClinSynth. Every failure aborts
//! the day's run; nothing here is retried automatically.
//! All errors are domain-specific and don't expose third-party types.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Main ClinSynth error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ClinSynthError {
    /// Malformed or missing configuration values that cannot be defaulted
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Persisted registry or counter could not be trusted
    #[error("State corruption: {0}")]
    StateCorruption(String),

    /// An expected per-day input table is absent
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A validation gate check failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Post-commit row counts could not be read back
    #[error("Commit read failure: {0}")]
    CommitReadFailure(String),

    /// Warehouse write errors
    #[error("Warehouse error: {0}")]
    Warehouse(String),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ClinSynthError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ClinSynthError::Configuration(_) => 2,
            ClinSynthError::MissingInput(_) | ClinSynthError::Validation(_) => 3,
            _ => 5,
        }
    }
}

/// Table a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTable {
    /// Active patient snapshot
    Patients,
    /// Encounter table
    Encounters,
    /// Vital events table
    Vitals,
}

impl fmt::Display for DayTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayTable::Patients => "patients",
            DayTable::Encounters => "encounters",
            DayTable::Vitals => "vitals",
        };
        f.write_str(name)
    }
}

/// Validation gate failures
///
/// The gate is fail-fast, so exactly one of these is reported per run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A strictly typed cell did not parse
    #[error("Cannot coerce {table}.{column} at row {row}: '{value}'")]
    Coercion {
        table: DayTable,
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Required vitals fields contain nulls
    #[error("Vitals contain nulls in required fields: {}", format_null_counts(.null_counts))]
    MissingRequiredFields {
        null_counts: BTreeMap<&'static str, usize>,
    },

    /// Encounter IDs appear more than once in the encounters table
    #[error("{count} encounter rows repeat an earlier encounter_id")]
    DuplicateEncounters { count: usize },

    /// Vitals rows reference encounters that do not exist
    #[error("{count} vitals rows reference unknown encounters")]
    OrphanVitals { count: usize },

    /// Vitals patient_id disagrees with the encounter's patient_id
    #[error("{count} vitals rows have a patient_id different from their encounter")]
    PatientMismatch { count: usize },

    /// Vitals event_time lies outside the encounter window
    #[error("{count} vitals rows fall outside their encounter's admit/discharge window")]
    TemporalContainment { count: usize },

    /// Committed warehouse rows disagree with the raw input
    #[error("Reconciliation failed for {table}: expected {expected} rows, committed {actual}")]
    Reconciliation {
        table: &'static str,
        expected: u64,
        actual: u64,
    },
}

fn format_null_counts(counts: &BTreeMap<&'static str, usize>) -> String {
    counts
        .iter()
        .map(|(column, count)| format!("{column}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

// Conversion from std::io::Error
impl From<std::io::Error> for ClinSynthError {
    fn from(err: std::io::Error) -> Self {
        ClinSynthError::Io(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for ClinSynthError {
    fn from(err: csv::Error) -> Self {
        ClinSynthError::Csv(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ClinSynthError {
    fn from(err: serde_json::Error) -> Self {
        ClinSynthError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ClinSynthError {
    fn from(err: toml::de::Error) -> Self {
        ClinSynthError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from rusqlite errors
impl From<rusqlite::Error> for ClinSynthError {
    fn from(err: rusqlite::Error) -> Self {
        ClinSynthError::Warehouse(err.to_string())
    }
}
