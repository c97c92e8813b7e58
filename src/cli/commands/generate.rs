//! Generate command implementation
//!
//! This module implements the `generate` command, which writes one day of
//! synthetic patients, encounters and vitals.

use super::{load_or_report, report_failure};
use crate::adapters::tables::DatasetMode;
use crate::core::generate::DailyBatchGenerator;
use crate::core::state::StateManager;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Day to generate (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Output tree (raw or sample)
    #[arg(long, default_value = "raw")]
    pub mode: DatasetMode,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(date = %self.date, mode = %self.mode, "Starting generate command");

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let state = StateManager::from_config(&config);
        let generator = DailyBatchGenerator::new(config, state);
        match generator.run(self.date, self.mode) {
            Ok(summary) => {
                println!("{}", summary.format_summary());
                Ok(0)
            }
            Err(e) => Ok(report_failure("Generation failed", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tables::{day_dir, MANIFEST_FILE};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_config(dir: &Path) -> String {
        let path = dir.join("clinsynth.toml");
        let toml = format!(
            "[patients]\ninitial_count = 4\n\n[encounters]\ncount_per_day = 3\n\n\
             [paths]\ndata_dir = \"{}\"\nstate_dir = \"{}\"\nwarehouse_path = \"{}\"\n",
            dir.join("data").display(),
            dir.join("state").display(),
            dir.join("wh.db").display(),
        );
        std::fs::write(&path, toml).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_generate_writes_day() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(dir.path());
        let args = GenerateArgs {
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            mode: DatasetMode::Sample,
        };

        assert_eq!(args.execute(&config_path).unwrap(), 0);
        let day = day_dir(&dir.path().join("data"), DatasetMode::Sample, args.date);
        assert!(day.join(MANIFEST_FILE).is_file());
    }

    #[test]
    fn test_generate_missing_config_exits_2() {
        let args = GenerateArgs {
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            mode: DatasetMode::Raw,
        };
        assert_eq!(args.execute("does-not-exist.toml").unwrap(), 2);
    }
}
