//! Run command implementation
//!
//! Generates a day and loads it in one invocation. The load reads the folder
//! back from disk, so it sees exactly what `generate` wrote.

use super::load::load_day;
use super::{load_or_report, report_failure};
use crate::adapters::tables::DatasetMode;
use crate::core::generate::DailyBatchGenerator;
use crate::core::state::StateManager;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Day to generate and load (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Output tree (raw or sample)
    #[arg(long, default_value = "raw")]
    pub mode: DatasetMode,
}

impl RunArgs {
    /// Execute the run command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(date = %self.date, mode = %self.mode, "Starting run command");

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let generator = DailyBatchGenerator::new(config.clone(), StateManager::from_config(&config));
        match generator.run(self.date, self.mode) {
            Ok(summary) => println!("{}\n", summary.format_summary()),
            Err(e) => return Ok(report_failure("Generation failed", &e)),
        }

        match load_day(&config, self.date, self.mode) {
            Ok(summary) => {
                println!("{}", summary.format_summary());
                println!("✅ Run completed successfully!");
                Ok(0)
            }
            Err(e) => Ok(report_failure("Load failed", &e)),
        }
    }
}
