//! Patient registry manager
//!
//! The registry is append-only: patients are created at initialization or by
//! daily growth, and never edited or removed.

use super::rng::{stream_rng, Stream};
use crate::core::state::StateManager;
use crate::domain::patient::MAX_AGE;
use crate::domain::{Patient, PatientId, Result, Sex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Outcome of a growth call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Growth {
    pub registry: Vec<Patient>,
    pub added: usize,
}

/// Creates, grows and snapshots the patient registry
pub struct RegistryManager<'a> {
    state: &'a StateManager,
}

impl<'a> RegistryManager<'a> {
    pub fn new(state: &'a StateManager) -> Self {
        Self { state }
    }

    /// Returns the persisted registry, creating it first when absent or empty
    ///
    /// A fresh registry holds patients `1..=initial_count` sampled from the
    /// registry initialization stream and is persisted before returning.
    pub fn ensure_registry(&self, initial_count: usize, seed: i64) -> Result<Vec<Patient>> {
        if let Some(existing) = self.state.load_registry()? {
            if !existing.is_empty() {
                tracing::debug!(patients = existing.len(), "Loaded patient registry");
                return Ok(existing);
            }
        }

        let mut rng = stream_rng(seed, Stream::RegistryInit);
        let registry: Vec<Patient> = (1..=initial_count as u64)
            .map(|id| sample_patient(&mut rng, PatientId::new(id)))
            .collect();

        self.state.save_registry(&registry)?;
        tracing::info!(patients = registry.len(), "Initialized patient registry");
        Ok(registry)
    }

    /// Appends up to `per_day_increment` patients without exceeding `max_total`
    ///
    /// New IDs continue from the current maximum. The full registry is
    /// rewritten whenever patients were added.
    pub fn grow_registry(
        &self,
        mut registry: Vec<Patient>,
        per_day_increment: i64,
        max_total: usize,
        seed: i64,
    ) -> Result<Growth> {
        let current = registry.len();
        if per_day_increment <= 0 || current >= max_total {
            return Ok(Growth { registry, added: 0 });
        }

        let increment = usize::try_from(per_day_increment).unwrap_or(usize::MAX);
        let added = increment.min(max_total - current);
        let next_id = registry
            .iter()
            .map(|patient| patient.patient_id)
            .max()
            .map_or(PatientId::new(1), PatientId::next);

        let mut rng = stream_rng(seed, Stream::RegistryGrowth);
        registry.extend(
            (0..added as u64).map(|i| sample_patient(&mut rng, PatientId::new(next_id.value() + i))),
        );

        self.state.save_registry(&registry)?;
        tracing::info!(added, total = registry.len(), max_total, "Grew patient registry");
        Ok(Growth { registry, added })
    }
}

/// Registry rows whose IDs are in `active_ids`, in registry order
pub fn export_active_subset(registry: &[Patient], active_ids: &BTreeSet<PatientId>) -> Vec<Patient> {
    registry
        .iter()
        .filter(|patient| active_ids.contains(&patient.patient_id))
        .cloned()
        .collect()
}

fn sample_patient(rng: &mut StdRng, patient_id: PatientId) -> Patient {
    let age = rng.gen_range(0..=MAX_AGE);
    let sex = *Sex::ALL.choose(rng).unwrap_or(&Sex::Unknown);
    Patient::new(patient_id, age, sex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecoveryPolicy;
    use crate::core::state::{MemoryCounterStore, MemoryRegistryStore};

    fn memory_state(patients: Option<Vec<Patient>>) -> StateManager {
        let registry = match patients {
            Some(patients) => MemoryRegistryStore::with_patients(patients),
            None => MemoryRegistryStore::default(),
        };
        StateManager::new(
            Box::new(registry),
            Box::new(MemoryCounterStore::default()),
            RecoveryPolicy::Fail,
        )
    }

    #[test]
    fn test_ensure_registry_initializes_sequential_ids() {
        let state = memory_state(None);
        let registry = RegistryManager::new(&state).ensure_registry(5, 42).unwrap();

        let ids: Vec<u64> = registry.iter().map(|p| p.patient_id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(registry.iter().all(|p| p.age <= MAX_AGE));
        assert_eq!(state.load_registry().unwrap().unwrap(), registry);
    }

    #[test]
    fn test_ensure_registry_is_deterministic() {
        let a = RegistryManager::new(&memory_state(None)).ensure_registry(20, 7).unwrap();
        let b = RegistryManager::new(&memory_state(None)).ensure_registry(20, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ensure_registry_returns_existing_verbatim() {
        let existing = vec![Patient::new(PatientId::new(40), 90, Sex::Male)];
        let state = memory_state(Some(existing.clone()));
        let registry = RegistryManager::new(&state).ensure_registry(100, 42).unwrap();
        assert_eq!(registry, existing);
    }

    #[test]
    fn test_ensure_registry_reinitializes_empty_store() {
        let state = memory_state(Some(Vec::new()));
        let registry = RegistryManager::new(&state).ensure_registry(3, 42).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_grow_registry_continues_ids() {
        let state = memory_state(None);
        let manager = RegistryManager::new(&state);
        let registry = manager.ensure_registry(3, 42).unwrap();

        let growth = manager.grow_registry(registry, 2, 100, 42).unwrap();
        assert_eq!(growth.added, 2);
        let ids: Vec<u64> = growth.registry.iter().map(|p| p.patient_id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(state.load_registry().unwrap().unwrap().len(), 5);
    }

    #[test]
    fn test_grow_registry_respects_cap() {
        let state = memory_state(None);
        let manager = RegistryManager::new(&state);
        let mut registry = manager.ensure_registry(3, 42).unwrap();

        for _ in 0..5 {
            let growth = manager.grow_registry(registry, 4, 10, 42).unwrap();
            registry = growth.registry;
            assert!(registry.len() <= 10);
        }
        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn test_grow_registry_noop_cases() {
        let state = memory_state(None);
        let manager = RegistryManager::new(&state);
        let registry = manager.ensure_registry(3, 42).unwrap();

        let growth = manager.grow_registry(registry.clone(), 0, 100, 42).unwrap();
        assert_eq!(growth.added, 0);
        let growth = manager.grow_registry(registry.clone(), -3, 100, 42).unwrap();
        assert_eq!(growth.added, 0);
        let growth = manager.grow_registry(registry, 5, 3, 42).unwrap();
        assert_eq!(growth.added, 0);
    }

    #[test]
    fn test_grow_empty_registry_starts_at_one() {
        let state = memory_state(None);
        let growth = RegistryManager::new(&state)
            .grow_registry(Vec::new(), 2, 10, 42)
            .unwrap();
        assert_eq!(growth.registry[0].patient_id, PatientId::new(1));
    }

    #[test]
    fn test_export_active_subset_exact() {
        let registry: Vec<Patient> = (1..=6)
            .map(|id| Patient::new(PatientId::new(id), 30, Sex::Female))
            .collect();
        let active: BTreeSet<PatientId> = [PatientId::new(5), PatientId::new(2)].into_iter().collect();

        let subset = export_active_subset(&registry, &active);
        let ids: Vec<u64> = subset.iter().map(|p| p.patient_id.value()).collect();
        assert_eq!(ids, vec![2, 5]);
    }
}
