//! Day folder reader
//!
//! Tables are read untyped: every cell stays a string until the validation
//! gate coerces it.

use super::{DAY_TABLE_FILES, ENCOUNTERS_FILE, PATIENTS_FILE, VITALS_FILE};
use crate::domain::{ClinSynthError, Result};
use csv::ReaderBuilder;
use std::path::Path;

/// An untyped CSV table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Builds a table from header names and rows of cells
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Reads a CSV file, trimming cells and a leading byte-order mark
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| ClinSynthError::Csv(format!("read {}: {e}", path.display())))?;

        let headers = reader
            .headers()
            .map_err(|e| ClinSynthError::Csv(format!("read headers {}: {e}", path.display())))?
            .iter()
            .map(|h| h.trim_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| ClinSynthError::Csv(format!("read record {}: {e}", path.display())))?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, `None` if the header is absent
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (`row`, `column`), `None` when missing or empty
    pub fn cell(&self, row: usize, column: Option<usize>) -> Option<&str> {
        let column = column?;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// The three untyped tables of a day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDay {
    pub patients: RawTable,
    pub encounters: RawTable,
    pub vitals: RawTable,
}

/// Reads a day folder
///
/// # Errors
///
/// Returns [`ClinSynthError::MissingInput`] naming every absent table
/// before anything is parsed.
pub fn read_day(day_dir: &Path) -> Result<RawDay> {
    let missing: Vec<&str> = DAY_TABLE_FILES
        .iter()
        .copied()
        .filter(|name| !day_dir.join(name).is_file())
        .collect();
    if !missing.is_empty() {
        return Err(ClinSynthError::MissingInput(format!(
            "{} is missing {}",
            day_dir.display(),
            missing.join(", ")
        )));
    }

    let day = RawDay {
        patients: RawTable::from_path(&day_dir.join(PATIENTS_FILE))?,
        encounters: RawTable::from_path(&day_dir.join(ENCOUNTERS_FILE))?,
        vitals: RawTable::from_path(&day_dir.join(VITALS_FILE))?,
    };

    tracing::debug!(
        dir = %day_dir.display(),
        patients = day.patients.len(),
        encounters = day.encounters.len(),
        vitals = day.vitals.len(),
        "Read day tables"
    );
    Ok(day)
}
