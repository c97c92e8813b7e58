//! Patient registry storage

use crate::adapters::tables::writer::{table_to_csv, PATIENT_COLUMNS};
use crate::core::state::atomic::write_atomic;
use crate::domain::{ClinSynthError, Patient, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the registry inside the state directory
pub const REGISTRY_FILE: &str = "patients_master.csv";

/// Storage for the append-only patient registry
pub trait RegistryStore {
    /// Loads the persisted registry, `None` when nothing has been saved yet
    ///
    /// # Errors
    ///
    /// Returns [`ClinSynthError::StateCorruption`] when the stored rows
    /// cannot be parsed or their IDs are not strictly increasing.
    fn load(&self) -> Result<Option<Vec<Patient>>>;

    /// Replaces the persisted registry with `patients`
    fn save(&self, patients: &[Patient]) -> Result<()>;
}

/// Registry persisted as CSV, rewritten in full on every save
#[derive(Debug, Clone)]
pub struct CsvRegistryStore {
    path: PathBuf,
}

impl CsvRegistryStore {
    /// Registry file at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Registry file inside `state_dir`
    pub fn in_dir(state_dir: impl AsRef<Path>) -> Self {
        Self::new(state_dir.as_ref().join(REGISTRY_FILE))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryStore for CsvRegistryStore {
    fn load(&self) -> Result<Option<Vec<Patient>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ClinSynthError::Io(format!(
                    "Failed to open {}: {e}",
                    self.path.display()
                )))
            }
        };

        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
        let mut patients = Vec::new();
        for (index, row) in reader.deserialize::<Patient>().enumerate() {
            let patient = row.map_err(|e| {
                ClinSynthError::StateCorruption(format!(
                    "Patient registry {} is malformed at row {}: {e}",
                    self.path.display(),
                    index + 1
                ))
            })?;
            if let Some(previous) = patients.last().map(|p: &Patient| p.patient_id) {
                if patient.patient_id <= previous {
                    return Err(ClinSynthError::StateCorruption(format!(
                        "Patient registry {} is malformed at row {}: patient_id {} after {}",
                        self.path.display(),
                        index + 1,
                        patient.patient_id,
                        previous
                    )));
                }
            }
            patients.push(patient);
        }

        Ok(Some(patients))
    }

    fn save(&self, patients: &[Patient]) -> Result<()> {
        let bytes = table_to_csv(patients, &PATIENT_COLUMNS)?;
        write_atomic(&self.path, &bytes)?;
        tracing::debug!(path = %self.path.display(), patients = patients.len(), "Registry saved");
        Ok(())
    }
}

/// In-memory registry for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryRegistryStore {
    patients: RefCell<Option<Vec<Patient>>>,
}

impl MemoryRegistryStore {
    /// Store pre-populated with `patients`
    pub fn with_patients(patients: Vec<Patient>) -> Self {
        Self {
            patients: RefCell::new(Some(patients)),
        }
    }
}

impl RegistryStore for MemoryRegistryStore {
    fn load(&self) -> Result<Option<Vec<Patient>>> {
        Ok(self.patients.borrow().clone())
    }

    fn save(&self, patients: &[Patient]) -> Result<()> {
        *self.patients.borrow_mut() = Some(patients.to_vec());
        Ok(())
    }
}
