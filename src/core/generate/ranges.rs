//! Vitals sampling ranges
//!
//! Range lookup is layered: a configured range for the encounter's scenario
//! wins, then the configured routine range, then the built-in routine range.

use crate::config::ScenarioRanges;
use crate::domain::{VitalRange, VitalType};
use std::collections::BTreeMap;

/// Scenario used when a scenario has no entry of its own
pub const ROUTINE: &str = "routine";

const BUILTIN: [(&str, [(VitalType, VitalRange); 6]); 4] = [
    (
        "routine",
        [
            (VitalType::HeartRate, VitalRange::new(60.0, 100.0)),
            (VitalType::RespRate, VitalRange::new(12.0, 20.0)),
            (VitalType::TemperatureC, VitalRange::new(36.3, 37.5)),
            (VitalType::Spo2, VitalRange::new(95.0, 100.0)),
            (VitalType::SystolicBp, VitalRange::new(105.0, 130.0)),
            (VitalType::DiastolicBp, VitalRange::new(65.0, 85.0)),
        ],
    ),
    (
        "chest_pain",
        [
            (VitalType::HeartRate, VitalRange::new(75.0, 115.0)),
            (VitalType::RespRate, VitalRange::new(14.0, 24.0)),
            (VitalType::TemperatureC, VitalRange::new(36.0, 37.8)),
            (VitalType::Spo2, VitalRange::new(92.0, 98.0)),
            (VitalType::SystolicBp, VitalRange::new(130.0, 170.0)),
            (VitalType::DiastolicBp, VitalRange::new(80.0, 100.0)),
        ],
    ),
    (
        "sepsis",
        [
            (VitalType::HeartRate, VitalRange::new(95.0, 140.0)),
            (VitalType::RespRate, VitalRange::new(18.0, 34.0)),
            (VitalType::TemperatureC, VitalRange::new(38.0, 40.2)),
            (VitalType::Spo2, VitalRange::new(88.0, 95.0)),
            (VitalType::SystolicBp, VitalRange::new(80.0, 105.0)),
            (VitalType::DiastolicBp, VitalRange::new(45.0, 70.0)),
        ],
    ),
    (
        "copd_hypoxia",
        [
            (VitalType::HeartRate, VitalRange::new(80.0, 120.0)),
            (VitalType::RespRate, VitalRange::new(16.0, 30.0)),
            (VitalType::TemperatureC, VitalRange::new(36.4, 38.0)),
            (VitalType::Spo2, VitalRange::new(82.0, 92.0)),
            (VitalType::SystolicBp, VitalRange::new(110.0, 150.0)),
            (VitalType::DiastolicBp, VitalRange::new(65.0, 95.0)),
        ],
    ),
];

/// The built-in range table, used as the configuration default
pub fn builtin_scenario_ranges() -> ScenarioRanges {
    BUILTIN
        .iter()
        .map(|(scenario, ranges)| {
            let by_type: BTreeMap<VitalType, VitalRange> = ranges.iter().copied().collect();
            (scenario.to_string(), by_type)
        })
        .collect()
}

/// Built-in routine range for a vital type
pub fn builtin_routine_range(vital_type: VitalType) -> VitalRange {
    BUILTIN[0]
        .1
        .iter()
        .find(|(candidate, _)| *candidate == vital_type)
        .map(|(_, range)| *range)
        .unwrap_or(VitalRange::new(0.0, 0.0))
}

/// Where a resolved range came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSource {
    /// Configured for the encounter's own scenario
    Scenario,
    /// Configured routine range
    Routine,
    /// Built-in routine range
    BuiltIn,
}

/// A range together with the layer that supplied it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRange {
    pub range: VitalRange,
    pub source: RangeSource,
}

/// Resolves the sampling range for `vital_type` in `scenario`
///
/// # Examples
///
/// ```
/// use clinsynth::core::generate::ranges::{builtin_scenario_ranges, resolve_range, RangeSource};
/// use clinsynth::domain::VitalType;
///
/// let table = builtin_scenario_ranges();
/// let resolved = resolve_range(&table, "trauma", VitalType::HeartRate);
/// assert_eq!(resolved.source, RangeSource::Routine);
/// assert_eq!(resolved.range.min, 60.0);
/// ```
pub fn resolve_range(table: &ScenarioRanges, scenario: &str, vital_type: VitalType) -> ResolvedRange {
    if let Some(range) = table.get(scenario).and_then(|ranges| ranges.get(&vital_type)) {
        return ResolvedRange {
            range: *range,
            source: RangeSource::Scenario,
        };
    }

    if let Some(range) = table.get(ROUTINE).and_then(|ranges| ranges.get(&vital_type)) {
        return ResolvedRange {
            range: *range,
            source: RangeSource::Routine,
        };
    }

    ResolvedRange {
        range: builtin_routine_range(vital_type),
        source: RangeSource::BuiltIn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_complete_and_valid() {
        let table = builtin_scenario_ranges();
        assert_eq!(table.len(), 4);
        for ranges in table.values() {
            assert_eq!(ranges.len(), VitalType::DEFAULT_ENABLED.len());
            assert!(ranges.values().all(VitalRange::is_valid));
        }
    }

    #[test]
    fn test_scenario_range_wins() {
        let table = builtin_scenario_ranges();
        let resolved = resolve_range(&table, "sepsis", VitalType::TemperatureC);
        assert_eq!(resolved.source, RangeSource::Scenario);
        assert_eq!(resolved.range, VitalRange::new(38.0, 40.2));
    }

    #[test]
    fn test_missing_type_falls_back_to_configured_routine() {
        let mut table = builtin_scenario_ranges();
        table.get_mut("sepsis").unwrap().remove(&VitalType::Spo2);
        table
            .get_mut(ROUTINE)
            .unwrap()
            .insert(VitalType::Spo2, VitalRange::new(97.0, 99.0));

        let resolved = resolve_range(&table, "sepsis", VitalType::Spo2);
        assert_eq!(resolved.source, RangeSource::Routine);
        assert_eq!(resolved.range, VitalRange::new(97.0, 99.0));
    }

    #[test]
    fn test_empty_table_uses_builtin_routine() {
        let resolved = resolve_range(&ScenarioRanges::new(), "chest_pain", VitalType::SystolicBp);
        assert_eq!(resolved.source, RangeSource::BuiltIn);
        assert_eq!(resolved.range, VitalRange::new(105.0, 130.0));
    }
}
