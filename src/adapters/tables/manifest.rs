//! Day manifest

use super::MANIFEST_FILE;
use crate::domain::{ClinSynthError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Provenance of a generated day
///
/// Carries no wall-clock time, so the same seed and state reproduce a
/// byte-identical manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayManifest {
    pub date: String,
    pub mode: String,
    pub seed: i64,
    /// First encounter ID of the day; greater than `last_encounter_id` when
    /// the day has no encounters
    pub first_encounter_id: u64,
    pub last_encounter_id: u64,
    /// File name → data rows
    pub row_counts: BTreeMap<String, usize>,
    /// File name → SHA-256 hex digest
    pub checksums: BTreeMap<String, String>,
}

impl DayManifest {
    /// Serialized form written to disk
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Reads the manifest of `day_dir`, `None` when the folder has none
    pub fn read(day_dir: &Path) -> Result<Option<Self>> {
        let path = day_dir.join(MANIFEST_FILE);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClinSynthError::Io(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_read_back() {
        let dir = TempDir::new().unwrap();
        let manifest = DayManifest {
            date: "2024-01-01".to_string(),
            mode: "raw".to_string(),
            seed: 42,
            first_encounter_id: 1,
            last_encounter_id: 2,
            row_counts: [("encounters.csv".to_string(), 2)].into_iter().collect(),
            checksums: BTreeMap::new(),
        };
        fs::write(dir.path().join(MANIFEST_FILE), manifest.to_bytes().unwrap()).unwrap();

        assert_eq!(DayManifest::read(dir.path()).unwrap(), Some(manifest));
    }

    #[test]
    fn test_missing_manifest_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(DayManifest::read(dir.path()).unwrap().is_none());
    }
}
