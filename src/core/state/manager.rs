//! State manager applying the recovery policy
//!
//! The manager owns both persisted stores and is the only place where a
//! corrupted store is either surfaced or reset.

use crate::config::{ClinSynthConfig, RecoveryPolicy};
use crate::core::state::counter::{CounterStore, FileCounterStore};
use crate::core::state::registry_store::{CsvRegistryStore, RegistryStore};
use crate::domain::{ClinSynthError, EncounterId, Patient, Result};
use crate::log_state_recovery;

/// Persisted state for sequential daily runs
///
/// Holds the patient registry store and the encounter counter store behind
/// one [`RecoveryPolicy`].
pub struct StateManager {
    registry: Box<dyn RegistryStore>,
    counter: Box<dyn CounterStore>,
    recovery: RecoveryPolicy,
}

impl StateManager {
    /// Create a new StateManager over the given stores
    pub fn new(
        registry: Box<dyn RegistryStore>,
        counter: Box<dyn CounterStore>,
        recovery: RecoveryPolicy,
    ) -> Self {
        Self {
            registry,
            counter,
            recovery,
        }
    }

    /// File-backed stores under `paths.state_dir` with the configured policy
    pub fn from_config(config: &ClinSynthConfig) -> Self {
        let state_dir = std::path::Path::new(&config.paths.state_dir);
        Self::new(
            Box::new(CsvRegistryStore::in_dir(state_dir)),
            Box::new(FileCounterStore::in_dir(state_dir)),
            config.state.recovery,
        )
    }

    /// Loads the registry
    ///
    /// Under [`RecoveryPolicy::Reset`] a malformed registry is treated as
    /// absent, so the caller re-initializes it.
    ///
    /// # Errors
    ///
    /// Returns [`ClinSynthError::StateCorruption`] under
    /// [`RecoveryPolicy::Fail`], or any I/O error from the store.
    pub fn load_registry(&self) -> Result<Option<Vec<Patient>>> {
        match self.registry.load() {
            Err(ClinSynthError::StateCorruption(reason))
                if self.recovery == RecoveryPolicy::Reset =>
            {
                log_state_recovery!("patient_registry", reason);
                Ok(None)
            }
            other => other,
        }
    }

    /// Persists the full registry
    pub fn save_registry(&self, patients: &[Patient]) -> Result<()> {
        self.registry.save(patients)
    }

    /// Reads the last allocated encounter ID
    ///
    /// Under [`RecoveryPolicy::Reset`] a malformed counter is rewritten as
    /// zero before returning it.
    pub fn last_encounter_id(&self) -> Result<EncounterId> {
        match self.counter.get() {
            Err(ClinSynthError::StateCorruption(reason))
                if self.recovery == RecoveryPolicy::Reset =>
            {
                log_state_recovery!("encounter_counter", reason);
                self.counter.reset()?;
                Ok(EncounterId::new(0))
            }
            other => other,
        }
    }

    /// Advances the counter from `expected` to `new`
    ///
    /// A conflict is never recovered: it means another writer issued IDs.
    pub fn commit_encounter_id(&self, expected: EncounterId, new: EncounterId) -> Result<()> {
        self.counter.compare_and_set(expected, new)
    }

    /// Active recovery policy
    pub fn recovery(&self) -> RecoveryPolicy {
        self.recovery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::counter::{FileCounterStore, MemoryCounterStore};
    use crate::core::state::registry_store::{CsvRegistryStore, MemoryRegistryStore};
    use std::fs;
    use tempfile::TempDir;

    fn file_manager(dir: &TempDir, recovery: RecoveryPolicy) -> StateManager {
        StateManager::new(
            Box::new(CsvRegistryStore::in_dir(dir.path())),
            Box::new(FileCounterStore::in_dir(dir.path())),
            recovery,
        )
    }

    #[test]
    fn test_fail_policy_surfaces_corrupt_counter() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("encounter_id_counter.txt"), "x").unwrap();
        let manager = file_manager(&dir, RecoveryPolicy::Fail);

        assert!(matches!(
            manager.last_encounter_id(),
            Err(ClinSynthError::StateCorruption(_))
        ));
    }

    #[test]
    fn test_reset_policy_rewrites_corrupt_counter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("encounter_id_counter.txt");
        fs::write(&path, "x").unwrap();
        let manager = file_manager(&dir, RecoveryPolicy::Reset);

        assert_eq!(manager.last_encounter_id().unwrap().value(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
        manager
            .commit_encounter_id(EncounterId::new(0), EncounterId::new(2))
            .unwrap();
    }

    #[test]
    fn test_fail_policy_surfaces_corrupt_registry() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("patients_master.csv"), "patient_id,age,sex\nx,1,M\n").unwrap();
        let manager = file_manager(&dir, RecoveryPolicy::Fail);

        assert!(matches!(
            manager.load_registry(),
            Err(ClinSynthError::StateCorruption(_))
        ));
    }

    #[test]
    fn test_reset_policy_treats_corrupt_registry_as_absent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("patients_master.csv"), "patient_id,age,sex\nx,1,M\n").unwrap();
        let manager = file_manager(&dir, RecoveryPolicy::Reset);

        assert!(manager.load_registry().unwrap().is_none());
    }

    #[test]
    fn test_commit_conflict_is_not_recovered() {
        let manager = StateManager::new(
            Box::new(MemoryRegistryStore::default()),
            Box::new(MemoryCounterStore::new(9)),
            RecoveryPolicy::Reset,
        );
        assert!(manager
            .commit_encounter_id(EncounterId::new(0), EncounterId::new(1))
            .is_err());
        assert_eq!(manager.last_encounter_id().unwrap().value(), 9);
    }
}
