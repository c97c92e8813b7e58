//! Integrity checks over coerced day tables
//!
//! Each check is a pure function that either passes or reports how many rows
//! violate it.

use super::coerce::CoercedVital;
use crate::domain::{Encounter, EncounterId, ValidationError};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Vitals columns that may never be null
pub const REQUIRED_VITAL_FIELDS: [&str; 5] =
    ["patient_id", "encounter_id", "event_time", "vital_type", "value"];

fn is_null(row: &CoercedVital, column: &str) -> bool {
    match column {
        "patient_id" => row.patient_id.is_none(),
        "encounter_id" => row.encounter_id.is_none(),
        "event_time" => row.event_time.is_none(),
        "vital_type" => row.vital_type.is_none(),
        "value" => row.value.is_none(),
        _ => false,
    }
}

/// Fails when any required vitals field is null, with per-column counts
pub fn check_required_fields(vitals: &[CoercedVital]) -> Result<(), ValidationError> {
    let null_counts: BTreeMap<&'static str, usize> = REQUIRED_VITAL_FIELDS
        .iter()
        .map(|&column| (column, vitals.iter().filter(|row| is_null(row, column)).count()))
        .filter(|(_, count)| *count > 0)
        .collect();

    if null_counts.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingRequiredFields { null_counts })
    }
}

/// Fails when an encounter ID is repeated, counting every repeat
///
/// Must pass before [`index_encounters`], which keeps one row per ID.
pub fn check_unique_encounters(encounters: &[Encounter]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(encounters.len());
    let count = encounters
        .iter()
        .filter(|encounter| !seen.insert(encounter.encounter_id))
        .count();

    if count == 0 {
        Ok(())
    } else {
        Err(ValidationError::DuplicateEncounters { count })
    }
}

/// Index of encounters by ID
pub fn index_encounters(encounters: &[Encounter]) -> HashMap<EncounterId, &Encounter> {
    encounters
        .iter()
        .map(|encounter| (encounter.encounter_id, encounter))
        .collect()
}

/// Fails when vitals reference encounters that do not exist
pub fn check_referential_integrity(
    vitals: &[CoercedVital],
    encounters: &HashMap<EncounterId, &Encounter>,
) -> Result<(), ValidationError> {
    let count = vitals
        .iter()
        .filter(|row| match row.encounter_id {
            Some(id) => !encounters.contains_key(&id),
            None => true,
        })
        .count();

    if count == 0 {
        Ok(())
    } else {
        Err(ValidationError::OrphanVitals { count })
    }
}

/// Fails when a vitals row's patient differs from its encounter's patient
///
/// Rows without a matching encounter are left to the referential check.
pub fn check_identity_consistency(
    vitals: &[CoercedVital],
    encounters: &HashMap<EncounterId, &Encounter>,
) -> Result<(), ValidationError> {
    let count = vitals
        .iter()
        .filter(|row| {
            match (row.encounter_id.and_then(|id| encounters.get(&id)), row.patient_id) {
                (Some(encounter), Some(patient_id)) => encounter.patient_id != patient_id,
                _ => false,
            }
        })
        .count();

    if count == 0 {
        Ok(())
    } else {
        Err(ValidationError::PatientMismatch { count })
    }
}

/// Fails when an event lies outside its encounter's window, bounds included
pub fn check_temporal_containment(
    vitals: &[CoercedVital],
    encounters: &HashMap<EncounterId, &Encounter>,
) -> Result<(), ValidationError> {
    let count = vitals
        .iter()
        .filter(|row| {
            match (row.encounter_id.and_then(|id| encounters.get(&id)), row.event_time) {
                (Some(encounter), Some(event_time)) => !encounter.contains(event_time),
                _ => false,
            }
        })
        .count();

    if count == 0 {
        Ok(())
    } else {
        Err(ValidationError::TemporalContainment { count })
    }
}

/// Fails when a committed row count differs from the expected count
pub fn reconcile(table: &'static str, expected: u64, actual: u64) -> Result<(), ValidationError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ValidationError::Reconciliation {
            table,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Acuity, PatientId};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn encounter(id: u64, patient: u64) -> Encounter {
        Encounter {
            encounter_id: EncounterId::new(id),
            patient_id: PatientId::new(patient),
            admit_time: at(0),
            discharge_time: at(2),
            scenario: "routine".to_string(),
            acuity: Acuity::Low,
        }
    }

    fn vital(encounter: u64, patient: u64, time: NaiveDateTime) -> CoercedVital {
        CoercedVital {
            encounter_id: Some(EncounterId::new(encounter)),
            patient_id: Some(PatientId::new(patient)),
            event_time: Some(time),
            vital_type: Some("heart_rate".to_string()),
            value: Some(80.0),
            unit: Some("bpm".to_string()),
            source: Some("monitor".to_string()),
        }
    }

    #[test]
    fn test_required_fields_counts_per_column() {
        let mut missing_value = vital(1, 1, at(0));
        missing_value.value = None;
        let mut missing_two = vital(1, 1, at(1));
        missing_two.value = None;
        missing_two.event_time = None;
        let mut missing_unit = vital(1, 1, at(1));
        missing_unit.unit = None;

        let err = check_required_fields(&[missing_value, missing_two, missing_unit]).unwrap_err();
        let ValidationError::MissingRequiredFields { null_counts } = err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(null_counts.get("value"), Some(&2));
        assert_eq!(null_counts.get("event_time"), Some(&1));
        assert!(!null_counts.contains_key("unit"));
    }

    #[test]
    fn test_duplicate_encounters_counted() {
        assert!(check_unique_encounters(&[encounter(1, 1), encounter(2, 1)]).is_ok());
        assert_eq!(
            check_unique_encounters(&[encounter(1, 7), encounter(1, 8), encounter(1, 9), encounter(2, 1)]),
            Err(ValidationError::DuplicateEncounters { count: 2 })
        );
    }

    #[test]
    fn test_orphans_counted() {
        let encounters = [encounter(1, 1)];
        let index = index_encounters(&encounters);
        let vitals = [vital(1, 1, at(0)), vital(2, 1, at(0)), vital(3, 1, at(0))];
        assert_eq!(
            check_referential_integrity(&vitals, &index),
            Err(ValidationError::OrphanVitals { count: 2 })
        );
    }

    #[test]
    fn test_patient_mismatch_counted() {
        let encounters = [encounter(1, 1), encounter(2, 2)];
        let index = index_encounters(&encounters);
        let vitals = [vital(1, 1, at(0)), vital(2, 1, at(0))];
        assert_eq!(
            check_identity_consistency(&vitals, &index),
            Err(ValidationError::PatientMismatch { count: 1 })
        );
    }

    #[test]
    fn test_temporal_bounds_inclusive() {
        let encounters = [encounter(1, 1)];
        let index = index_encounters(&encounters);
        let vitals = [vital(1, 1, at(0)), vital(1, 1, at(2))];
        assert!(check_temporal_containment(&vitals, &index).is_ok());
    }

    #[test]
    fn test_one_second_after_discharge() {
        let encounters = [encounter(1, 1)];
        let index = index_encounters(&encounters);
        let vitals = [vital(1, 1, at(1)), vital(1, 1, at(2) + Duration::seconds(1))];
        assert_eq!(
            check_temporal_containment(&vitals, &index),
            Err(ValidationError::TemporalContainment { count: 1 })
        );
    }

    #[test]
    fn test_reconcile() {
        assert!(reconcile("dim_patients", 3, 3).is_ok());
        assert_eq!(
            reconcile("fact_encounters", 4, 3),
            Err(ValidationError::Reconciliation {
                table: "fact_encounters",
                expected: 4,
                actual: 3,
            })
        );
    }
}
