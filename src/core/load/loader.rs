//! Daily warehouse load
//!
//! Extract, validate, stage and commit one day folder. The gate runs before
//! anything touches the warehouse; the two table replaces then commit
//! independently.

use super::summary::LoadSummary;
use crate::adapters::tables::{day_dir, read_day, DatasetMode, DayManifest, MANIFEST_FILE};
use crate::adapters::warehouse::Warehouse;
use crate::core::transform::stage_day;
use crate::core::validation::run_gate;
use crate::core::verification::{verify_day, VerificationFailure, VerificationReport};
use crate::domain::{ClinSynthError, Result};
use crate::{log_day_complete, log_day_start};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Loads generated days into a warehouse
pub struct WarehouseLoader {
    data_dir: PathBuf,
    warehouse: Box<dyn Warehouse>,
}

impl WarehouseLoader {
    /// Create a loader reading day folders under `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>, warehouse: Box<dyn Warehouse>) -> Self {
        Self {
            data_dir: data_dir.into(),
            warehouse,
        }
    }

    /// Load one day
    ///
    /// # Errors
    ///
    /// - [`ClinSynthError::MissingInput`] if the folder or a table is absent
    /// - [`ClinSynthError::Validation`] if a gate check or reconciliation fails
    /// - [`ClinSynthError::CommitReadFailure`] if committed counts cannot be read
    pub fn load(&mut self, date: NaiveDate, source: DatasetMode) -> Result<LoadSummary> {
        let start = Instant::now();
        log_day_start!("load", date, source);

        let input_dir = day_dir(&self.data_dir, source, date);
        if !input_dir.is_dir() {
            return Err(ClinSynthError::MissingInput(format!(
                "Input folder not found: {}",
                input_dir.display()
            )));
        }

        let raw = read_day(&input_dir)?;

        let verification = check_manifest(&input_dir);

        let validated = run_gate(&raw)?;
        let staged = stage_day(&validated);

        let patients = self.warehouse.replace_patients(&staged.patients)?;
        let encounters = self.warehouse.replace_encounters(&staged.facts)?;

        let summary = LoadSummary {
            date,
            source,
            input_dir,
            verification,
            validation: validated.report,
            patients,
            encounters,
            duration: Duration::ZERO,
        };
        let duration = start.elapsed();
        log_day_complete!("load", summary.patients.committed + summary.encounters.committed, duration);

        Ok(LoadSummary { duration, ..summary })
    }

    /// Warehouse this loader writes to
    pub fn warehouse(&self) -> &dyn Warehouse {
        self.warehouse.as_ref()
    }
}

/// Compares a day folder with its manifest, if one exists
///
/// Informational only; a hand-edited day can still pass the gate. An
/// unreadable manifest is recorded as a failed entry rather than an error.
fn check_manifest(input_dir: &Path) -> Option<VerificationReport> {
    let report = match DayManifest::read(input_dir) {
        Ok(Some(manifest)) => verify_day(input_dir, &manifest),
        Ok(None) => return None,
        Err(e) => {
            let mut report = VerificationReport::new();
            report.add_failure(VerificationFailure {
                file: MANIFEST_FILE.to_string(),
                expected_checksum: String::new(),
                actual_checksum: String::new(),
                reason: format!("Unreadable manifest: {e}"),
            });
            report
        }
    };

    if !report.is_success() {
        tracing::warn!(
            dir = %input_dir.display(),
            failed = report.failed,
            "Day folder differs from its manifest"
        );
    }
    Some(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::warehouse::SqliteWarehouse;
    use crate::domain::ValidationError;
    use std::fs;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn write_tables(data_dir: &std::path::Path, vitals_rows: &str) {
        let dir = day_dir(data_dir, DatasetMode::Raw, date());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("patients.csv"), "patient_id,age,sex\n1,44,M\n").unwrap();
        fs::write(
            dir.join("encounters.csv"),
            "encounter_id,patient_id,admit_time,discharge_time,scenario,acuity\n\
             1,1,2024-01-01T00:00:00,2024-01-01T02:00:00,routine,low\n",
        )
        .unwrap();
        fs::write(
            dir.join("vitals.csv"),
            format!("encounter_id,patient_id,event_time,vital_type,value,unit,source\n{vitals_rows}"),
        )
        .unwrap();
    }

    fn loader(dir: &TempDir) -> WarehouseLoader {
        WarehouseLoader::new(
            dir.path(),
            Box::new(SqliteWarehouse::open_in_memory().unwrap()),
        )
    }

    #[test]
    fn test_load_without_manifest() {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path(), "1,1,2024-01-01T01:00:00,heart_rate,80,bpm,monitor\n");

        let mut loader = loader(&dir);
        let summary = loader.load(date(), DatasetMode::Raw).unwrap();
        assert!(summary.verification.is_none());
        assert_eq!(summary.patients.committed, 1);
        assert_eq!(summary.encounters.committed, 1);
        assert_eq!(loader.warehouse().row_counts().unwrap().fact_encounters, 1);
    }

    #[test]
    fn test_gate_failure_leaves_warehouse_untouched() {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path(), "1,1,2024-01-01T02:00:01,heart_rate,80,bpm,monitor\n");

        let mut loader = loader(&dir);
        let err = loader.load(date(), DatasetMode::Raw).unwrap_err();
        assert!(matches!(
            err,
            ClinSynthError::Validation(ValidationError::TemporalContainment { count: 1 })
        ));
        assert_eq!(loader.warehouse().row_counts().unwrap().raw_patients, 0);
    }

    #[test]
    fn test_missing_folder() {
        let dir = TempDir::new().unwrap();
        let err = loader(&dir).load(date(), DatasetMode::Sample).unwrap_err();
        assert!(matches!(err, ClinSynthError::MissingInput(_)));
        assert_eq!(err.exit_code(), 3);
    }
}
