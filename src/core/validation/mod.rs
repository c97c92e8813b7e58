//! Integrity validation gate
//!
//! Runs before anything is written to the warehouse. Checks run in a fixed
//! order and the first failure aborts the load:
//!
//! 1. field coercion
//! 2. required vitals fields
//! 3. unique encounter IDs
//! 4. referential integrity of vitals to encounters
//! 5. patient identity consistency
//! 6. temporal containment
//!
//! Post-load reconciliation lives in [`checks::reconcile`] and is run by the
//! warehouse inside each table's transaction.
//!
//! # Example
//!
//! ```
//! use clinsynth::adapters::tables::RawDay;
//! use clinsynth::core::validation::run_gate;
//!
//! let day = RawDay::default();
//! let validated = run_gate(&day).unwrap();
//! assert_eq!(validated.report.vitals_checked, 0);
//! ```

pub mod checks;
pub mod coerce;
pub mod report;

pub use coerce::{CoercedVital, CoercedVitals};
pub use report::ValidationReport;

use crate::adapters::tables::RawDay;
use crate::domain::{Encounter, Patient, ValidationError};

/// A day that passed every pre-load check
#[derive(Debug, Clone)]
pub struct ValidatedDay {
    pub patients: Vec<Patient>,
    pub encounters: Vec<Encounter>,
    pub vitals: Vec<CoercedVital>,
    pub report: ValidationReport,
}

/// Runs the pre-load checks over a raw day, failing fast
pub fn run_gate(day: &RawDay) -> Result<ValidatedDay, ValidationError> {
    let vitals = coerce::coerce_vitals(&day.vitals);
    if !vitals.nulled.is_empty() {
        tracing::warn!(nulled = ?vitals.nulled, "Unparseable vitals cells coerced to null");
    }
    let patients = coerce::coerce_patients(&day.patients)?;
    let encounters = coerce::coerce_encounters(&day.encounters)?;

    checks::check_required_fields(&vitals.rows)?;

    checks::check_unique_encounters(&encounters)?;
    let index = checks::index_encounters(&encounters);
    checks::check_referential_integrity(&vitals.rows, &index)?;
    checks::check_identity_consistency(&vitals.rows, &index)?;
    checks::check_temporal_containment(&vitals.rows, &index)?;

    let report = ValidationReport {
        patients_checked: patients.len(),
        encounters_checked: encounters.len(),
        vitals_checked: vitals.rows.len(),
        coerced_to_null: vitals.nulled,
    };
    report.log_summary();

    Ok(ValidatedDay {
        patients,
        encounters,
        vitals: vitals.rows,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tables::RawTable;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn day(vitals: &[&[&str]]) -> RawDay {
        RawDay {
            patients: table(&["patient_id", "age", "sex"], &[&["7", "51", "F"]]),
            encounters: table(
                &["encounter_id", "patient_id", "admit_time", "discharge_time", "scenario", "acuity"],
                &[&["1", "7", "2024-01-01T00:00:00", "2024-01-01T02:00:00", "routine", "low"]],
            ),
            vitals: table(
                &["encounter_id", "patient_id", "event_time", "vital_type", "value", "unit", "source"],
                vitals,
            ),
        }
    }

    #[test]
    fn test_clean_day_passes() {
        let validated = run_gate(&day(&[
            &["1", "7", "2024-01-01T00:00:00", "heart_rate", "70", "bpm", "monitor"],
            &["1", "7", "2024-01-01T02:00:00", "heart_rate", "71", "bpm", "monitor"],
        ]))
        .unwrap();
        assert_eq!(validated.report.vitals_checked, 2);
        assert_eq!(validated.encounters.len(), 1);
    }

    #[test]
    fn test_required_fields_checked_before_orphans() {
        let err = run_gate(&day(&[&["99", "7", "2024-01-01T00:00:00", "heart_rate", "oops", "bpm", "monitor"]]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequiredFields { .. }));
    }

    #[test]
    fn test_duplicate_encounter_ids_rejected() {
        let mut raw = day(&[&["1", "8", "2024-01-01T01:00:00", "heart_rate", "70", "bpm", "monitor"]]);
        raw.encounters = table(
            &["encounter_id", "patient_id", "admit_time", "discharge_time", "scenario", "acuity"],
            &[
                &["1", "7", "2024-01-01T00:00:00", "2024-01-01T02:00:00", "routine", "low"],
                &["1", "8", "2024-01-01T10:00:00", "2024-01-01T12:00:00", "routine", "low"],
            ],
        );
        assert_eq!(run_gate(&raw).unwrap_err(), ValidationError::DuplicateEncounters { count: 1 });
    }

    #[test]
    fn test_orphans_checked_before_mismatch() {
        let err = run_gate(&day(&[
            &["2", "8", "2024-01-01T00:00:00", "heart_rate", "70", "bpm", "monitor"],
            &["1", "8", "2024-01-01T00:00:00", "heart_rate", "70", "bpm", "monitor"],
        ]))
        .unwrap_err();
        assert_eq!(err, ValidationError::OrphanVitals { count: 1 });
    }

    #[test]
    fn test_mismatch_checked_before_containment() {
        let err = run_gate(&day(&[&["1", "8", "2024-01-01T05:00:00", "heart_rate", "70", "bpm", "monitor"]]))
            .unwrap_err();
        assert_eq!(err, ValidationError::PatientMismatch { count: 1 });
    }
}
