//! Daily batch generation
//!
//! Runs registry growth, encounter allocation and vitals sampling for one day,
//! writes the day folder, then advances the encounter counter.

use super::encounters::generate_day;
use super::registry::{export_active_subset, RegistryManager};
use super::summary::GenerationSummary;
use super::vitals::VitalsSampler;
use crate::adapters::tables::{write_day, DatasetMode, DayTables};
use crate::config::ClinSynthConfig;
use crate::core::state::StateManager;
use crate::domain::{PatientId, Result};
use crate::{log_day_complete, log_day_start};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Generates complete days against persisted state
///
/// # Ordering
///
/// The counter is read first, so corrupt state fails the day before the
/// registry changes. Registry growth is persisted before encounters are
/// drawn and is not rolled back. The day folder is moved into place before the counter
/// compare-and-set, so a crash in between leaves the counter at its old
/// value and a re-run regenerates the same IDs over the same folder.
pub struct DailyBatchGenerator {
    config: ClinSynthConfig,
    state: StateManager,
    data_dir: PathBuf,
}

impl DailyBatchGenerator {
    /// Create a generator writing under `config.paths.data_dir`
    pub fn new(config: ClinSynthConfig, state: StateManager) -> Self {
        let data_dir = PathBuf::from(&config.paths.data_dir);
        Self {
            config,
            state,
            data_dir,
        }
    }

    /// Generate one day
    ///
    /// # Errors
    ///
    /// Any failure aborts the day; the counter is only advanced on success.
    pub fn run(&self, date: NaiveDate, mode: DatasetMode) -> Result<GenerationSummary> {
        let start = Instant::now();
        let seed = self.config.seed;
        log_day_start!("generate", date, mode);

        // Read before growth so a corrupt counter fails the day with state untouched
        let start_id = self.state.last_encounter_id()?;

        let registry_manager = RegistryManager::new(&self.state);
        let registry = registry_manager.ensure_registry(self.config.patients.initial_count, seed)?;
        let growth = registry_manager.grow_registry(
            registry,
            self.config.patients.new_patients_per_day,
            self.config.patients.max_total,
            seed,
        )?;
        let registry = growth.registry;

        let pool: Vec<PatientId> = registry.iter().map(|patient| patient.patient_id).collect();
        let allocation = generate_day(
            date,
            self.config.encounters.count_per_day,
            &pool,
            &self.config.encounters.effective_scenarios(),
            start_id,
            seed,
        )?;

        let vitals = VitalsSampler::new(&self.config.vitals, seed).generate(date, &allocation.encounters);

        let active_ids: BTreeSet<PatientId> = allocation
            .encounters
            .iter()
            .map(|encounter| encounter.patient_id)
            .collect();
        let patients = export_active_subset(&registry, &active_ids);

        let tables = DayTables {
            patients,
            encounters: allocation.encounters,
            vitals,
        };
        let written = write_day(
            &self.data_dir,
            mode,
            date,
            seed,
            &tables,
            allocation.start_id,
            allocation.new_last_id,
        )?;

        self.state
            .commit_encounter_id(allocation.start_id, allocation.new_last_id)?;

        let summary = GenerationSummary {
            date,
            mode,
            output_dir: written.dir,
            seed,
            registry_total: registry.len(),
            patients_added: growth.added,
            active_patients: tables.patients.len(),
            encounters: tables.encounters.len(),
            vitals: tables.vitals.len(),
            start_encounter_id: allocation.start_id,
            last_encounter_id: allocation.new_last_id,
            duration: Duration::ZERO,
        }
        .with_duration(start.elapsed());

        log_day_complete!(
            "generate",
            summary.encounters + summary.vitals + summary.active_patients,
            summary.duration
        );
        Ok(summary)
    }

    /// Persisted state this generator runs against
    pub fn state(&self) -> &StateManager {
        &self.state
    }
}
