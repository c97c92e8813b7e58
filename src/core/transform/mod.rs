//! Staging of validated tables into warehouse rows
//!
//! The warehouse keeps the raw tables as loaded plus two curated tables:
//!
//! - **dim_patients**: one row per patient in the day's snapshot
//! - **fact_encounters**: one row per encounter, with length of stay derived
//!   from the admit and discharge times
//!
//! Vitals are validated but not loaded.

use crate::core::validation::ValidatedDay;
use crate::domain::{Encounter, Patient};
use serde::Serialize;

/// Curated encounter row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactEncounterRow {
    pub encounter: Encounter,
    /// Fractional hours between admit and discharge
    pub los_hours: f64,
}

impl From<&Encounter> for FactEncounterRow {
    fn from(encounter: &Encounter) -> Self {
        Self {
            encounter: encounter.clone(),
            los_hours: encounter.los_hours(),
        }
    }
}

/// A day ready for the warehouse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedDay {
    /// Raw patient rows; `dim_patients` is projected from these
    pub patients: Vec<Patient>,
    /// Encounter rows; `raw_encounters` takes the encounter, `fact_encounters`
    /// adds the length of stay
    pub facts: Vec<FactEncounterRow>,
}

/// Stages a validated day
///
/// # Examples
///
/// ```
/// use clinsynth::adapters::tables::RawDay;
/// use clinsynth::core::transform::stage_day;
/// use clinsynth::core::validation::run_gate;
///
/// let validated = run_gate(&RawDay::default()).unwrap();
/// let staged = stage_day(&validated);
/// assert!(staged.facts.is_empty());
/// ```
pub fn stage_day(day: &ValidatedDay) -> StagedDay {
    let facts: Vec<FactEncounterRow> = day.encounters.iter().map(FactEncounterRow::from).collect();
    tracing::debug!(
        patients = day.patients.len(),
        encounters = facts.len(),
        "Staged day for warehouse"
    );

    StagedDay {
        patients: day.patients.clone(),
        facts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::ValidationReport;
    use crate::domain::{Acuity, EncounterId, PatientId, Sex};
    use chrono::{Duration, NaiveDate};

    fn validated(patient_ids: &[u64]) -> ValidatedDay {
        let admit = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        ValidatedDay {
            patients: patient_ids
                .iter()
                .map(|&id| Patient::new(PatientId::new(id), 40, Sex::Unknown))
                .collect(),
            encounters: vec![Encounter {
                encounter_id: EncounterId::new(5),
                patient_id: PatientId::new(patient_ids[0]),
                admit_time: admit,
                discharge_time: admit + Duration::minutes(90),
                scenario: "sepsis".to_string(),
                acuity: Acuity::High,
            }],
            vitals: Vec::new(),
            report: ValidationReport::default(),
        }
    }

    #[test]
    fn test_los_hours_is_fractional() {
        let staged = stage_day(&validated(&[1]));
        assert_eq!(staged.facts.len(), 1);
        assert_eq!(staged.facts[0].los_hours, 1.5);
        assert_eq!(staged.facts[0].encounter.encounter_id, EncounterId::new(5));
    }

    #[test]
    fn test_patient_rows_kept_as_loaded() {
        let staged = stage_day(&validated(&[1, 2, 2]));
        assert_eq!(staged.patients.len(), 3);
        assert_eq!(staged.facts.len(), 1);
    }
}
