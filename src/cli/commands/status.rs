//! Status command implementation
//!
//! This module implements the `status` command. It only reads: a malformed
//! store is reported, never reset.

use super::load_or_report;
use crate::adapters::warehouse::{SqliteWarehouse, Warehouse, WarehouseCounts};
use crate::core::state::{CounterStore, CsvRegistryStore, FileCounterStore, RegistryStore};
use crate::domain::Result;
use clap::Args;
use std::path::Path;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Registry size and highest patient ID, `None` before the first run
fn registry_status(state_dir: &Path) -> Result<Option<(usize, u64)>> {
    let registry = CsvRegistryStore::in_dir(state_dir).load()?;
    Ok(registry.map(|patients| {
        let max_id = patients
            .iter()
            .map(|patient| patient.patient_id.value())
            .max()
            .unwrap_or(0);
        (patients.len(), max_id)
    }))
}

/// Warehouse counts, `None` when the file does not exist yet
fn warehouse_status(path: &Path) -> Result<Option<WarehouseCounts>> {
    if !path.is_file() {
        return Ok(None);
    }
    SqliteWarehouse::open(path)?.row_counts().map(Some)
}

impl StatusArgs {
    /// Execute the status command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking status");

        println!("📊 ClinSynth Status");
        println!();

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let state_dir = Path::new(&config.paths.state_dir);
        let mut exit_code = 0;

        match registry_status(state_dir) {
            Ok(Some((size, max_id))) => {
                println!("  Registry Size: {size}");
                println!("  Max Patient ID: {max_id}");
            }
            Ok(None) => println!("  Registry: not initialized"),
            Err(e) => {
                println!("  Registry: ❌ {e}");
                exit_code = e.exit_code();
            }
        }

        match FileCounterStore::in_dir(state_dir).get() {
            Ok(last_id) => println!("  Last Encounter ID: {last_id}"),
            Err(e) => {
                println!("  Encounter Counter: ❌ {e}");
                exit_code = e.exit_code();
            }
        }

        match warehouse_status(Path::new(&config.paths.warehouse_path)) {
            Ok(Some(counts)) => {
                println!();
                println!("  {:<18} {:>10}", "Table", "Rows");
                println!("  {}", "-".repeat(29));
                for (table, rows) in [
                    ("raw_patients", counts.raw_patients),
                    ("raw_encounters", counts.raw_encounters),
                    ("dim_patients", counts.dim_patients),
                    ("fact_encounters", counts.fact_encounters),
                ] {
                    println!("  {table:<18} {rows:>10}");
                }
            }
            Ok(None) => println!("  Warehouse: not created"),
            Err(e) => {
                println!("  Warehouse: ❌ {e}");
                exit_code = e.exit_code();
            }
        }

        println!();
        Ok(exit_code)
    }
}
