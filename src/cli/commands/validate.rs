//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the ClinSynth configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(e.exit_code());
            }
        };

        let vital_types: Vec<&str> = config
            .vitals
            .effective_vital_types()
            .iter()
            .map(|vt| vt.as_str())
            .collect();

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Seed: {}", config.seed);
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Patients: initial {}, +{}/day, max {}",
            config.patients.initial_count,
            config.patients.new_patients_per_day.max(0),
            config.patients.max_total
        );
        println!("  Encounters per Day: {}", config.encounters.count_per_day);
        println!("  Scenarios: {:?}", config.encounters.effective_scenarios());
        println!(
            "  Vitals: every {} min, types {:?}",
            config.vitals.effective_frequency_minutes(),
            vital_types
        );
        println!("  Data Dir: {}", config.paths.data_dir);
        println!("  State Dir: {}", config.paths.state_dir);
        println!("  Warehouse: {}", config.paths.warehouse_path);
        println!("  Recovery Policy: {}", config.state.recovery);
        println!();
        Ok(0)
    }
}
