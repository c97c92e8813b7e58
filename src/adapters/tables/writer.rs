//! Day folder writer
//!
//! Tables are written into a hidden staging folder next to the target and
//! moved into place with a rename, so readers never observe a partial day.

use super::manifest::DayManifest;
use super::{day_dir, DatasetMode, DayTables, ENCOUNTERS_FILE, MANIFEST_FILE, PATIENTS_FILE, VITALS_FILE};
use crate::core::verification::checksum::calculate_checksum_bytes;
use crate::domain::{ClinSynthError, EncounterId, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column order of `patients.csv`
pub const PATIENT_COLUMNS: [&str; 3] = ["patient_id", "age", "sex"];
/// Column order of `encounters.csv`
pub const ENCOUNTER_COLUMNS: [&str; 6] = [
    "encounter_id",
    "patient_id",
    "admit_time",
    "discharge_time",
    "scenario",
    "acuity",
];
/// Column order of `vitals.csv`
pub const VITAL_COLUMNS: [&str; 7] = [
    "encounter_id",
    "patient_id",
    "event_time",
    "vital_type",
    "value",
    "unit",
    "source",
];

/// A day folder that has been moved into place
#[derive(Debug, Clone)]
pub struct WrittenDay {
    pub dir: PathBuf,
    pub manifest: DayManifest,
}

/// Serializes rows as CSV with a header, including when `rows` is empty
pub fn table_to_csv<T: Serialize>(rows: &[T], columns: &[&str]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| ClinSynthError::Csv(format!("Failed to flush CSV rows: {e}")))
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> ClinSynthError {
    ClinSynthError::Io(format!("Failed to {action} {}: {e}", path.display()))
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| io_error("create", path, e))?;
    file.write_all(bytes).map_err(|e| io_error("write", path, e))?;
    file.sync_all().map_err(|e| io_error("sync", path, e))
}

/// Writes the day's tables and manifest, replacing any previous folder
///
/// `start_id` is the counter value before the day and `new_last_id` the
/// value it will be advanced to.
pub fn write_day(
    data_dir: &Path,
    mode: DatasetMode,
    date: NaiveDate,
    seed: i64,
    tables: &DayTables,
    start_id: EncounterId,
    new_last_id: EncounterId,
) -> Result<WrittenDay> {
    let target = day_dir(data_dir, mode, date);
    let parent = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.to_path_buf());
    let day_name = date.format("%Y-%m-%d").to_string();
    let staging = parent.join(format!(".{day_name}.staging"));
    let previous = parent.join(format!(".{day_name}.previous"));

    fs::create_dir_all(&parent).map_err(|e| io_error("create", &parent, e))?;
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|e| io_error("remove stale", &staging, e))?;
    }
    fs::create_dir(&staging).map_err(|e| io_error("create", &staging, e))?;

    let files = [
        (PATIENTS_FILE, table_to_csv(&tables.patients, &PATIENT_COLUMNS)?, tables.patients.len()),
        (ENCOUNTERS_FILE, table_to_csv(&tables.encounters, &ENCOUNTER_COLUMNS)?, tables.encounters.len()),
        (VITALS_FILE, table_to_csv(&tables.vitals, &VITAL_COLUMNS)?, tables.vitals.len()),
    ];

    let mut row_counts = BTreeMap::new();
    let mut checksums = BTreeMap::new();
    for (name, bytes, rows) in &files {
        write_synced(&staging.join(name), bytes)?;
        row_counts.insert(name.to_string(), *rows);
        checksums.insert(name.to_string(), calculate_checksum_bytes(bytes));
    }

    let manifest = DayManifest {
        date: day_name,
        mode: mode.to_string(),
        seed,
        first_encounter_id: start_id.next().value(),
        last_encounter_id: new_last_id.value(),
        row_counts,
        checksums,
    };
    write_synced(&staging.join(MANIFEST_FILE), &manifest.to_bytes()?)?;

    if previous.exists() {
        fs::remove_dir_all(&previous).map_err(|e| io_error("remove stale", &previous, e))?;
    }
    let replaced = target.exists();
    if replaced {
        fs::rename(&target, &previous).map_err(|e| io_error("move aside", &target, e))?;
    }
    fs::rename(&staging, &target).map_err(|e| io_error("move into place", &staging, e))?;
    if replaced {
        fs::remove_dir_all(&previous).map_err(|e| io_error("remove", &previous, e))?;
    }

    tracing::info!(
        dir = %target.display(),
        replaced,
        patients = tables.patients.len(),
        encounters = tables.encounters.len(),
        vitals = tables.vitals.len(),
        "Day tables written"
    );

    Ok(WrittenDay {
        dir: target,
        manifest,
    })
}
