//! Load summary and reporting

use crate::adapters::tables::DatasetMode;
use crate::adapters::warehouse::TableLoad;
use crate::core::validation::ValidationReport;
use crate::core::verification::VerificationReport;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one loaded day
#[derive(Debug, Clone)]
pub struct LoadSummary {
    /// Loaded day
    pub date: NaiveDate,

    /// Tree the day was read from
    pub source: DatasetMode,

    /// Folder the tables were read from
    pub input_dir: PathBuf,

    /// Manifest check, `None` when the day has no manifest
    pub verification: Option<VerificationReport>,

    /// What the gate checked
    pub validation: ValidationReport,

    /// Patient dimension replace
    pub patients: TableLoad,

    /// Encounter fact replace
    pub encounters: TableLoad,

    /// Wall time of the run
    pub duration: Duration,
}

impl LoadSummary {
    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            date = %self.date,
            source = %self.source,
            input_dir = %self.input_dir.display(),
            dim_patients = self.patients.committed,
            unique_raw_patients = self.patients.expected,
            fact_encounters = self.encounters.committed,
            raw_encounters = self.encounters.expected,
            vitals_validated = self.validation.vitals_checked,
            duration_ms = self.duration.as_millis() as u64,
            "Load completed"
        );
    }

    /// Console report printed by the CLI
    pub fn format_summary(&self) -> String {
        let manifest = match &self.verification {
            Some(report) => report.format_summary(),
            None => "Manifest verification: skipped (no manifest)".to_string(),
        };
        format!(
            "=== Load Complete ===\n\
             date: {}\n\
             source: {}\n\
             input_dir: {}\n\
             {}\n\
             vitals_validated: {}\n\
             dim_patients: {} (unique raw patients: {})\n\
             fact_encounters: {} (raw encounters: {})",
            self.date,
            self.source,
            self.input_dir.display(),
            manifest,
            self.validation.vitals_checked,
            self.patients.committed,
            self.patients.expected,
            self.encounters.committed,
            self.encounters.expected,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_summary_without_manifest() {
        let summary = LoadSummary {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            source: DatasetMode::Sample,
            input_dir: PathBuf::from("data/sample/2024-01-01"),
            verification: None,
            validation: ValidationReport::default(),
            patients: TableLoad {
                table: "dim_patients",
                expected: 3,
                committed: 3,
            },
            encounters: TableLoad {
                table: "fact_encounters",
                expected: 2,
                committed: 2,
            },
            duration: Duration::ZERO,
        };

        let text = summary.format_summary();
        assert!(text.contains("source: sample"));
        assert!(text.contains("skipped (no manifest)"));
        assert!(text.contains("fact_encounters: 2 (raw encounters: 2)"));
    }
}
