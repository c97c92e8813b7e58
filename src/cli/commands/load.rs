//! Load command implementation
//!
//! This module implements the `load` command: gate one generated day and
//! replace the warehouse tables with it.

use super::{load_or_report, report_failure};
use crate::adapters::tables::DatasetMode;
use crate::adapters::warehouse::SqliteWarehouse;
use crate::config::ClinSynthConfig;
use crate::core::load::{LoadSummary, WarehouseLoader};
use crate::domain::Result;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Day to load (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Tree to read the day from (raw or sample)
    #[arg(long, default_value = "raw")]
    pub source: DatasetMode,
}

/// Opens the configured warehouse and loads one day
pub(crate) fn load_day(config: &ClinSynthConfig, date: NaiveDate, source: DatasetMode) -> Result<LoadSummary> {
    let warehouse = SqliteWarehouse::open(&config.paths.warehouse_path)?;
    let mut loader = WarehouseLoader::new(&config.paths.data_dir, Box::new(warehouse));
    let summary = loader.load(date, source)?;
    summary.log_summary();
    Ok(summary)
}

impl LoadArgs {
    /// Execute the load command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(date = %self.date, source = %self.source, "Starting load command");

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match load_day(&config, self.date, self.source) {
            Ok(summary) => {
                println!("{}", summary.format_summary());
                println!("✅ Load completed successfully!");
                Ok(0)
            }
            Err(e) => Ok(report_failure("Load failed", &e)),
        }
    }
}
