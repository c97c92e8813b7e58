//! Scenario-driven vitals sampler
//!
//! Walks each encounter from admit to discharge in fixed steps and emits one
//! event per enabled vital type at every step.

use super::ranges::resolve_range;
use super::rng::{stream_rng, Stream};
use crate::config::{ScenarioRanges, SourceWeights, VitalsConfig};
use crate::domain::{Encounter, VitalEvent, VitalSource, VitalType};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::Rng;

/// Samples vital events for a day's encounters
#[derive(Debug, Clone)]
pub struct VitalsSampler {
    frequency_minutes: i64,
    vital_types: Vec<VitalType>,
    ranges: ScenarioRanges,
    source_weights: SourceWeights,
    seed: i64,
}

impl VitalsSampler {
    /// Builds a sampler with configuration defaults already applied
    pub fn new(config: &VitalsConfig, seed: i64) -> Self {
        Self {
            frequency_minutes: config.effective_frequency_minutes(),
            vital_types: config.effective_vital_types(),
            ranges: config.scenario_ranges.clone(),
            source_weights: config.source_weights,
            seed,
        }
    }

    /// Step between measurements
    pub fn frequency_minutes(&self) -> i64 {
        self.frequency_minutes
    }

    /// Generates events for `encounters`, in encounter order
    ///
    /// The day does not change sampling; it is only used for logging.
    /// Encounters with discharge before admit produce no events.
    pub fn generate(&self, day: NaiveDate, encounters: &[Encounter]) -> Vec<VitalEvent> {
        let mut rng = stream_rng(self.seed, Stream::Vitals);
        let step = Duration::minutes(self.frequency_minutes);
        let mut events = Vec::new();
        let mut skipped = 0usize;

        for encounter in encounters {
            if encounter.discharge_time < encounter.admit_time {
                skipped += 1;
                continue;
            }

            let mut event_time = encounter.admit_time;
            while event_time <= encounter.discharge_time {
                let source = pick_source(&mut rng, self.source_weights);
                for &vital_type in &self.vital_types {
                    let resolved = resolve_range(&self.ranges, &encounter.scenario, vital_type);
                    let sampled = rng.gen_range(resolved.range.min..=resolved.range.max);
                    events.push(VitalEvent {
                        encounter_id: encounter.encounter_id,
                        patient_id: encounter.patient_id,
                        event_time,
                        vital_type,
                        value: vital_type.round(sampled),
                        unit: vital_type.unit().to_string(),
                        source,
                    });
                }
                event_time += step;
            }
        }

        if skipped > 0 {
            tracing::warn!(%day, skipped, "Skipped encounters discharged before admission");
        }
        tracing::debug!(%day, encounters = encounters.len(), events = events.len(), "Sampled vitals");
        events
    }
}

/// One monitor/manual draw, shared by every vital type at a step
fn pick_source(rng: &mut StdRng, weights: SourceWeights) -> VitalSource {
    let total = weights.monitor + weights.manual;
    if total <= 0.0 {
        return VitalSource::Monitor;
    }
    let r = rng.gen::<f64>() * total;
    if r <= weights.monitor {
        VitalSource::Monitor
    } else {
        VitalSource::Manual
    }
}
