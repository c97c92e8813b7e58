//! Day folder verification against its manifest

use super::checksum::calculate_checksum_file;
use super::report::{VerificationFailure, VerificationReport};
use crate::adapters::tables::DayManifest;
use std::path::Path;

/// Recalculates every checksum listed in `manifest` for files in `day_dir`
///
/// Unreadable files are reported as failures rather than errors so the
/// caller sees every problem at once.
pub fn verify_day(day_dir: &Path, manifest: &DayManifest) -> VerificationReport {
    let mut report = VerificationReport::new();

    for (file, expected) in &manifest.checksums {
        match calculate_checksum_file(&day_dir.join(file)) {
            Ok(actual) if &actual == expected => report.add_pass(),
            Ok(actual) => report.add_failure(VerificationFailure {
                file: file.clone(),
                expected_checksum: expected.clone(),
                actual_checksum: actual,
                reason: "checksum mismatch".to_string(),
            }),
            Err(e) => report.add_failure(VerificationFailure {
                file: file.clone(),
                expected_checksum: expected.clone(),
                actual_checksum: String::new(),
                reason: e.to_string(),
            }),
        }
    }

    tracing::debug!(
        dir = %day_dir.display(),
        passed = report.passed,
        failed = report.failed,
        "Verified day manifest"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::verification::checksum::calculate_checksum_bytes;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn manifest(checksums: BTreeMap<String, String>) -> DayManifest {
        DayManifest {
            date: "2024-01-01".to_string(),
            mode: "raw".to_string(),
            seed: 42,
            first_encounter_id: 1,
            last_encounter_id: 0,
            row_counts: BTreeMap::new(),
            checksums,
        }
    }

    #[test]
    fn test_verify_detects_modified_and_missing_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("patients.csv"), "a").unwrap();
        std::fs::write(dir.path().join("encounters.csv"), "changed").unwrap();

        let mut checksums = BTreeMap::new();
        checksums.insert("patients.csv".to_string(), calculate_checksum_bytes(b"a"));
        checksums.insert("encounters.csv".to_string(), calculate_checksum_bytes(b"b"));
        checksums.insert("vitals.csv".to_string(), calculate_checksum_bytes(b"c"));

        let report = verify_day(dir.path(), &manifest(checksums));
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 2);
        let files: Vec<&str> = report.failures.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(files, vec!["encounters.csv", "vitals.csv"]);
    }
}
