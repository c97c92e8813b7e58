//! Integration tests for generating days and loading them into the warehouse

use chrono::NaiveDate;
use clinsynth::adapters::tables::{day_dir, DatasetMode, MANIFEST_FILE, VITALS_FILE};
use clinsynth::adapters::warehouse::{SqliteWarehouse, Warehouse};
use clinsynth::config::ClinSynthConfig;
use clinsynth::core::generate::DailyBatchGenerator;
use clinsynth::core::load::WarehouseLoader;
use clinsynth::core::state::StateManager;
use clinsynth::domain::{ClinSynthError, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    config: ClinSynthConfig,
    warehouse_path: PathBuf,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = ClinSynthConfig::default();
        config.patients.initial_count = 20;
        config.encounters.count_per_day = 12;
        config.paths.data_dir = dir.path().join("data").to_string_lossy().to_string();
        config.paths.state_dir = dir.path().join("state").to_string_lossy().to_string();
        let warehouse_path = dir.path().join("warehouse").join("clinical.db");
        config.paths.warehouse_path = warehouse_path.to_string_lossy().to_string();
        Self {
            _dir: dir,
            config,
            warehouse_path,
        }
    }

    fn generate(&self, date: NaiveDate) {
        DailyBatchGenerator::new(self.config.clone(), StateManager::from_config(&self.config))
            .run(date, DatasetMode::Raw)
            .unwrap();
    }

    fn loader(&self) -> WarehouseLoader {
        let warehouse = SqliteWarehouse::open(&self.warehouse_path).unwrap();
        WarehouseLoader::new(&self.config.paths.data_dir, Box::new(warehouse))
    }

    fn day_dir(&self, date: NaiveDate) -> PathBuf {
        day_dir(Path::new(&self.config.paths.data_dir), DatasetMode::Raw, date)
    }
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

#[test]
fn test_generated_day_loads_and_reconciles() {
    let harness = Harness::new();
    harness.generate(date(1));

    let summary = harness.loader().load(date(1), DatasetMode::Raw).unwrap();
    assert_eq!(summary.encounters.committed, 12);
    assert_eq!(summary.encounters.expected, 12);
    assert_eq!(summary.patients.committed, summary.patients.expected);
    assert!(summary.verification.as_ref().unwrap().is_success());
    assert!(summary.validation.vitals_checked > 0);
}

#[test]
fn test_each_load_replaces_previous_day() {
    let harness = Harness::new();
    harness.generate(date(1));
    harness.generate(date(2));

    let mut loader = harness.loader();
    loader.load(date(1), DatasetMode::Raw).unwrap();
    let second = loader.load(date(2), DatasetMode::Raw).unwrap();

    let counts = loader.warehouse().row_counts().unwrap();
    assert_eq!(counts.fact_encounters, 12);
    assert_eq!(counts.dim_patients, second.patients.committed);
}

#[test]
fn test_tampered_day_is_rejected_and_warehouse_kept() {
    let harness = Harness::new();
    harness.generate(date(1));
    harness.generate(date(2));
    harness.loader().load(date(1), DatasetMode::Raw).unwrap();

    // Shift every vitals row of day 2 to an encounter ID that does not exist
    let vitals_path = harness.day_dir(date(2)).join(VITALS_FILE);
    let original = fs::read_to_string(&vitals_path).unwrap();
    let mut lines = original.lines();
    let header = lines.next().unwrap();
    let tampered: Vec<String> = lines
        .map(|line| {
            let (_, rest) = line.split_once(',').unwrap();
            format!("999999,{rest}")
        })
        .collect();
    let rows = tampered.len();
    fs::write(&vitals_path, format!("{header}\n{}\n", tampered.join("\n"))).unwrap();

    let mut loader = harness.loader();
    let err = loader.load(date(2), DatasetMode::Raw).unwrap_err();
    assert!(matches!(
        err,
        ClinSynthError::Validation(ValidationError::OrphanVitals { count }) if count == rows
    ));

    // Day 1 is still what the warehouse holds
    let counts = SqliteWarehouse::open(&harness.warehouse_path).unwrap().row_counts().unwrap();
    assert_eq!(counts.fact_encounters, 12);
}

#[test]
fn test_manifest_mismatch_is_reported_not_fatal() {
    let harness = Harness::new();
    harness.generate(date(3));

    // Same rows plus a trailing blank line: the gate still passes, the hash does not
    let vitals_path = harness.day_dir(date(3)).join(VITALS_FILE);
    let contents = fs::read_to_string(&vitals_path).unwrap();
    fs::write(&vitals_path, format!("{contents}\n")).unwrap();

    let summary = harness.loader().load(date(3), DatasetMode::Raw).unwrap();
    let report = summary.verification.unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures[0].file, VITALS_FILE);
}

#[test]
fn test_truncated_manifest_is_reported_not_fatal() {
    let harness = Harness::new();
    harness.generate(date(4));
    fs::write(harness.day_dir(date(4)).join(MANIFEST_FILE), "{ truncated").unwrap();

    let summary = harness.loader().load(date(4), DatasetMode::Raw).unwrap();
    assert_eq!(summary.encounters.committed, 12);

    let report = summary.verification.unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures[0].file, MANIFEST_FILE);
    assert!(report.failures[0].reason.contains("Unreadable manifest"));
}

#[test]
fn test_missing_day_folder() {
    let harness = Harness::new();
    let err = harness.loader().load(date(9), DatasetMode::Sample).unwrap_err();
    assert!(matches!(err, ClinSynthError::MissingInput(_)));
    assert!(err.to_string().contains("sample"));
}
