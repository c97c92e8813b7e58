//! Warehouse abstraction

use crate::core::transform::FactEncounterRow;
use crate::domain::{Patient, Result};
use serde::Serialize;

/// Outcome of one reconciled table replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLoad {
    /// Curated table name
    pub table: &'static str,

    /// Row count the raw input implies
    pub expected: u64,

    /// Rows committed to the curated table
    pub committed: u64,
}

/// Row counts of every warehouse table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WarehouseCounts {
    pub raw_patients: u64,
    pub raw_encounters: u64,
    pub dim_patients: u64,
    pub fact_encounters: u64,
}

/// A relational target for validated days
///
/// Each replace swaps one raw table and its curated projection together,
/// reconciling counts before commit. A failed reconciliation leaves the
/// previous contents of both tables in place. No transaction spans the
/// patient and encounter replaces.
pub trait Warehouse {
    /// Replaces `raw_patients` and `dim_patients`
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ValidationError::Reconciliation`] when
    /// `dim_patients` does not hold one row per distinct raw patient, and
    /// [`crate::domain::ClinSynthError::CommitReadFailure`] when the counts
    /// cannot be read.
    fn replace_patients(&mut self, patients: &[Patient]) -> Result<TableLoad>;

    /// Replaces `raw_encounters` and `fact_encounters`
    ///
    /// # Errors
    ///
    /// As [`Warehouse::replace_patients`], against the raw encounter row count.
    fn replace_encounters(&mut self, facts: &[FactEncounterRow]) -> Result<TableLoad>;

    /// Current row counts
    fn row_counts(&self) -> Result<WarehouseCounts>;
}
