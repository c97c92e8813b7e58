//! Encounter allocator
//!
//! Generates one day of encounters with IDs continuing from the persisted
//! counter. Generation is pure; the counter only advances when the caller
//! commits through [`crate::core::state::StateManager::commit_encounter_id`].

use super::rng::{stream_rng, Stream};
use crate::domain::{Acuity, ClinSynthError, Encounter, EncounterId, PatientId, Result};
use chrono::{Duration, NaiveDate, NaiveTime};
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Last minute of the day an admission can start at
const LAST_ADMIT_MINUTE: i64 = 23 * 60 + 59;

/// Allowed acuities and length-of-stay bounds for a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioProfile {
    pub name: &'static str,
    pub acuities: &'static [Acuity],
    pub min_los_hours: i64,
    pub max_los_hours: i64,
}

const PROFILES: [ScenarioProfile; 4] = [
    ScenarioProfile {
        name: "routine",
        acuities: &[Acuity::Low, Acuity::Medium],
        min_los_hours: 6,
        max_los_hours: 36,
    },
    ScenarioProfile {
        name: "chest_pain",
        acuities: &[Acuity::Medium, Acuity::High],
        min_los_hours: 12,
        max_los_hours: 72,
    },
    ScenarioProfile {
        name: "sepsis",
        acuities: &[Acuity::High],
        min_los_hours: 24,
        max_los_hours: 120,
    },
    ScenarioProfile {
        name: "copd_hypoxia",
        acuities: &[Acuity::Medium, Acuity::High],
        min_los_hours: 24,
        max_los_hours: 96,
    },
];

impl ScenarioProfile {
    /// Profile for `scenario`, or the routine profile when unknown
    pub fn lookup(scenario: &str) -> &'static ScenarioProfile {
        PROFILES
            .iter()
            .find(|profile| profile.name == scenario)
            .unwrap_or(&PROFILES[0])
    }
}

/// A generated day of encounters
#[derive(Debug, Clone, PartialEq)]
pub struct DayAllocation {
    pub encounters: Vec<Encounter>,
    /// Counter value before this day
    pub start_id: EncounterId,
    /// Counter value to commit once the day is durably written
    pub new_last_id: EncounterId,
}

/// Weighted scenario picker
///
/// All-zero weights fall back to a uniform pick.
struct ScenarioPicker {
    names: Vec<String>,
    weights: Option<WeightedIndex<f64>>,
}

impl ScenarioPicker {
    fn new(weights: &BTreeMap<String, f64>) -> Result<Self> {
        let names: Vec<String> = weights.keys().cloned().collect();
        let index = match WeightedIndex::new(weights.values().copied()) {
            Ok(index) => Some(index),
            Err(WeightedError::AllWeightsZero) => {
                tracing::warn!("All scenario weights are zero, choosing scenarios uniformly");
                None
            }
            Err(e) => {
                return Err(ClinSynthError::Configuration(format!(
                    "Invalid scenario weights: {e}"
                )))
            }
        };
        Ok(Self {
            names,
            weights: index,
        })
    }

    fn pick(&self, rng: &mut StdRng) -> &str {
        let index = match &self.weights {
            Some(weights) => weights.sample(rng),
            None => rng.gen_range(0..self.names.len()),
        };
        &self.names[index]
    }
}

/// Generates `count` encounters for `day`
///
/// IDs run from `start_id + 1` to `start_id + count`. Every draw comes from
/// the encounter stream, in the order patient, scenario, acuity, length of
/// stay, admit minute.
///
/// # Errors
///
/// Returns [`ClinSynthError::Configuration`] when `count > 0` and either the
/// patient pool or the scenario map is empty, or a weight is invalid.
pub fn generate_day(
    day: NaiveDate,
    count: usize,
    patient_pool: &[PatientId],
    scenario_weights: &BTreeMap<String, f64>,
    start_id: EncounterId,
    seed: i64,
) -> Result<DayAllocation> {
    if count == 0 {
        return Ok(DayAllocation {
            encounters: Vec::new(),
            start_id,
            new_last_id: start_id,
        });
    }
    if patient_pool.is_empty() {
        return Err(ClinSynthError::Configuration(format!(
            "Cannot generate {count} encounters for {day}: the patient registry is empty"
        )));
    }
    if scenario_weights.is_empty() {
        return Err(ClinSynthError::Configuration(
            "encounters.scenarios must name at least one scenario".to_string(),
        ));
    }

    let picker = ScenarioPicker::new(scenario_weights)?;
    let mut rng = stream_rng(seed, Stream::Encounters);
    let day_start = day.and_time(NaiveTime::MIN);

    let mut encounters = Vec::with_capacity(count);
    let mut last_id = start_id;

    for _ in 0..count {
        last_id = last_id.next();

        let patient_id = *patient_pool
            .choose(&mut rng)
            .ok_or_else(|| ClinSynthError::Configuration("Patient pool is empty".to_string()))?;
        let scenario = picker.pick(&mut rng).to_string();

        let profile = ScenarioProfile::lookup(&scenario);
        let acuity = *profile.acuities.choose(&mut rng).unwrap_or(&Acuity::Low);
        let los_hours = rng.gen_range(profile.min_los_hours..=profile.max_los_hours);
        let admit_minute = rng.gen_range(0..=LAST_ADMIT_MINUTE);

        let admit_time = day_start + Duration::minutes(admit_minute);
        let discharge_time = admit_time + Duration::hours(los_hours);

        encounters.push(Encounter {
            encounter_id: last_id,
            patient_id,
            admit_time,
            discharge_time,
            scenario,
            acuity,
        });
    }

    tracing::debug!(
        %day,
        count,
        first_id = %start_id.next(),
        last_id = %last_id,
        "Generated encounters"
    );

    Ok(DayAllocation {
        encounters,
        start_id,
        new_last_id: last_id,
    })
}
