//! Encounter ID counter storage
//!
//! The counter holds the last encounter ID ever issued. It is global mutable
//! state shared by every daily run, so writers go through compare-and-set.

use crate::core::state::atomic::write_atomic;
use crate::domain::{ClinSynthError, EncounterId, Result};
use std::cell::Cell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the counter inside the state directory
pub const COUNTER_FILE: &str = "encounter_id_counter.txt";

/// Storage for the last allocated encounter ID
///
/// An absent or empty store reads as `EncounterId::new(0)`.
pub trait CounterStore {
    /// Returns the last allocated ID
    ///
    /// # Errors
    ///
    /// Returns [`ClinSynthError::StateCorruption`] when the stored value is
    /// not a non-negative integer.
    fn get(&self) -> Result<EncounterId>;

    /// Replaces the value with `new` if it still equals `expected`
    ///
    /// # Errors
    ///
    /// Returns [`ClinSynthError::StateCorruption`] when the current value
    /// differs from `expected` or cannot be read.
    fn compare_and_set(&self, expected: EncounterId, new: EncounterId) -> Result<()>;

    /// Unconditionally stores zero. Used only by the `reset` recovery policy.
    fn reset(&self) -> Result<()>;
}

fn conflict(expected: EncounterId, actual: EncounterId) -> ClinSynthError {
    ClinSynthError::StateCorruption(format!(
        "Encounter counter changed underneath this run: expected {expected}, found {actual}"
    ))
}

/// Counter persisted as a single integer in a text file
#[derive(Debug, Clone)]
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    /// Counter file at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Counter file inside `state_dir`
    pub fn in_dir(state_dir: impl AsRef<Path>) -> Self {
        Self::new(state_dir.as_ref().join(COUNTER_FILE))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, value: EncounterId) -> Result<()> {
        write_atomic(&self.path, value.to_string().as_bytes())
    }
}

impl CounterStore for FileCounterStore {
    fn get(&self) -> Result<EncounterId> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(EncounterId::new(0)),
            Err(e) => {
                return Err(ClinSynthError::Io(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(EncounterId::new(0));
        }

        trimmed.parse::<EncounterId>().map_err(|e| {
            ClinSynthError::StateCorruption(format!(
                "Encounter counter {} is malformed: {e}",
                self.path.display()
            ))
        })
    }

    fn compare_and_set(&self, expected: EncounterId, new: EncounterId) -> Result<()> {
        let current = self.get()?;
        if current != expected {
            return Err(conflict(expected, current));
        }
        self.write(new)?;
        tracing::debug!(path = %self.path.display(), from = %expected, to = %new, "Encounter counter advanced");
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        self.write(EncounterId::new(0))
    }
}

/// In-memory counter for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    value: Cell<u64>,
}

impl MemoryCounterStore {
    /// Counter starting at `last_id`
    pub fn new(last_id: u64) -> Self {
        Self {
            value: Cell::new(last_id),
        }
    }
}

impl CounterStore for MemoryCounterStore {
    fn get(&self) -> Result<EncounterId> {
        Ok(EncounterId::new(self.value.get()))
    }

    fn compare_and_set(&self, expected: EncounterId, new: EncounterId) -> Result<()> {
        let current = EncounterId::new(self.value.get());
        if current != expected {
            return Err(conflict(expected, current));
        }
        self.value.set(new.value());
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        self.value.set(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test]
    fn test_missing_file_reads_zero() {
        let dir = TempDir::new().unwrap();
        let store = FileCounterStore::in_dir(dir.path());
        assert_eq!(store.get().unwrap(), EncounterId::new(0));
    }

    #[test_case("" ; "empty")]
    #[test_case("  \n" ; "whitespace")]
    fn test_blank_file_reads_zero(contents: &str) {
        let dir = TempDir::new().unwrap();
        let store = FileCounterStore::in_dir(dir.path());
        fs::write(store.path(), contents).unwrap();
        assert_eq!(store.get().unwrap().value(), 0);
    }

    #[test_case("abc")]
    #[test_case("-4")]
    #[test_case("1.5")]
    fn test_malformed_file_is_corruption(contents: &str) {
        let dir = TempDir::new().unwrap();
        let store = FileCounterStore::in_dir(dir.path());
        fs::write(store.path(), contents).unwrap();
        assert!(matches!(store.get(), Err(ClinSynthError::StateCorruption(_))));
    }

    #[test]
    fn test_compare_and_set_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileCounterStore::in_dir(dir.path());

        store
            .compare_and_set(EncounterId::new(0), EncounterId::new(160))
            .unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "160");
        assert_eq!(store.get().unwrap().value(), 160);
    }

    #[test]
    fn test_compare_and_set_conflict_leaves_value() {
        let dir = TempDir::new().unwrap();
        let store = FileCounterStore::in_dir(dir.path());
        fs::write(store.path(), "10").unwrap();

        let result = store.compare_and_set(EncounterId::new(5), EncounterId::new(20));
        assert!(matches!(result, Err(ClinSynthError::StateCorruption(_))));
        assert_eq!(store.get().unwrap().value(), 10);
    }

    #[test]
    fn test_reset_overwrites_garbage() {
        let dir = TempDir::new().unwrap();
        let store = FileCounterStore::in_dir(dir.path());
        fs::write(store.path(), "garbage").unwrap();

        store.reset().unwrap();
        assert_eq!(store.get().unwrap().value(), 0);
    }

    #[test]
    fn test_memory_store_cas() {
        let store = MemoryCounterStore::new(3);
        assert!(store
            .compare_and_set(EncounterId::new(2), EncounterId::new(4))
            .is_err());
        store
            .compare_and_set(EncounterId::new(3), EncounterId::new(4))
            .unwrap();
        assert_eq!(store.get().unwrap().value(), 4);
    }
}
