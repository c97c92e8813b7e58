//! Generation summary and reporting

use crate::adapters::tables::DatasetMode;
use crate::domain::EncounterId;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one generated day
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Generated day
    pub date: NaiveDate,

    /// Output tree the day was written to
    pub mode: DatasetMode,

    /// Folder holding the day's tables
    pub output_dir: PathBuf,

    /// Base seed
    pub seed: i64,

    /// Registry size after growth
    pub registry_total: usize,

    /// Patients added by today's growth
    pub patients_added: usize,

    /// Rows in the active patient snapshot
    pub active_patients: usize,

    /// Encounter rows written
    pub encounters: usize,

    /// Vital event rows written
    pub vitals: usize,

    /// Counter value before the day
    pub start_encounter_id: EncounterId,

    /// Counter value committed after the day
    pub last_encounter_id: EncounterId,

    /// Wall time of the run
    pub duration: Duration,
}

impl GenerationSummary {
    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Encounter IDs issued today, `None` when no encounters were generated
    pub fn encounter_id_range(&self) -> Option<(EncounterId, EncounterId)> {
        (self.last_encounter_id > self.start_encounter_id)
            .then(|| (self.start_encounter_id.next(), self.last_encounter_id))
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            date = %self.date,
            mode = %self.mode,
            output_dir = %self.output_dir.display(),
            seed = self.seed,
            registry_total = self.registry_total,
            patients_added = self.patients_added,
            active_patients = self.active_patients,
            encounters = self.encounters,
            vitals = self.vitals,
            encounter_counter = %self.last_encounter_id,
            duration_ms = self.duration.as_millis() as u64,
            "Generation completed"
        );
    }

    /// Console report printed by the CLI
    pub fn format_summary(&self) -> String {
        let ids = match self.encounter_id_range() {
            Some((first, last)) => format!("{first}..={last}"),
            None => "none".to_string(),
        };
        format!(
            "=== Generation Complete ===\n\
             date: {}\n\
             mode: {}\n\
             output_dir: {}\n\
             seed: {}\n\
             registry_total: {} (added today: {})\n\
             active_patients_written: {}\n\
             encounters_written: {}\n\
             vitals_written: {}\n\
             encounter_ids: {}\n\
             encounter_id_counter: {}",
            self.date,
            self.mode,
            self.output_dir.display(),
            self.seed,
            self.registry_total,
            self.patients_added,
            self.active_patients,
            self.encounters,
            self.vitals,
            ids,
            self.last_encounter_id,
        )
    }
}
