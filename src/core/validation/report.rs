//! Validation gate report

use serde::Serialize;
use std::collections::BTreeMap;

/// What the gate saw on a passing day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Patient snapshot rows
    pub patients_checked: usize,

    /// Encounter rows
    pub encounters_checked: usize,

    /// Vitals rows
    pub vitals_checked: usize,

    /// Non-empty vitals cells that failed to parse, per column
    pub coerced_to_null: BTreeMap<&'static str, usize>,
}

impl ValidationReport {
    /// Log the report
    pub fn log_summary(&self) {
        tracing::info!(
            patients = self.patients_checked,
            encounters = self.encounters_checked,
            vitals = self.vitals_checked,
            "Validation gate passed"
        );
    }
}
