//! Verification report structures

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Result of re-checking a day folder against its manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Files checked
    pub total_verified: usize,

    /// Files whose checksum matched
    pub passed: usize,

    /// Files whose checksum differed or that could not be read
    pub failed: usize,

    /// Failed files with details
    pub failures: Vec<VerificationFailure>,
}

/// Details of a failed file check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationFailure {
    /// File name inside the day folder
    pub file: String,

    /// Checksum recorded in the manifest
    pub expected_checksum: String,

    /// Checksum recalculated now, empty when the file could not be read
    pub actual_checksum: String,

    /// Reason for failure
    pub reason: String,
}

impl VerificationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a matching file
    pub fn add_pass(&mut self) {
        self.total_verified += 1;
        self.passed += 1;
    }

    /// Record a mismatching or unreadable file
    pub fn add_failure(&mut self, failure: VerificationFailure) {
        self.total_verified += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Whether every file matched
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Human-readable summary
    pub fn format_summary(&self) -> String {
        let mut out = format!(
            "Manifest verification: {}/{} files match",
            self.passed, self.total_verified
        );
        for failure in &self.failures {
            let _ = write!(out, "\n  - {}: {}", failure.file, failure.reason);
        }
        out
    }
}
