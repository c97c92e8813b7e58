//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "clinsynth.toml")]
    pub output: String,

    /// Include every section with comments and the vitals range table
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ClinSynth configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: clinsynth validate-config");
                println!("  3. Generate and load a day: clinsynth run --date 2024-01-01");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# ClinSynth Configuration File
# Synthetic daily clinical data generator

seed = 42

[application]
log_level = "info"

[patients]
initial_count = 100
new_patients_per_day = 2
max_total = 5000

[encounters]
count_per_day = 160

[vitals]
frequency_minutes = 60

[paths]
data_dir = "data"
state_dir = "state"
warehouse_path = "warehouse/clinical.db"
"#
        .to_string()
    }

    /// Generate configuration with every section documented
    fn generate_config_with_examples() -> String {
        r#"# ClinSynth Configuration File
# Synthetic daily clinical data generator
#
# Values may reference environment variables as ${VAR_NAME}; the run fails if
# a referenced variable is unset. Any setting can also be overridden with
# CLINSYNTH_<SECTION>_<KEY>, e.g. CLINSYNTH_ENCOUNTERS_COUNT_PER_DAY=200.

# Base seed. Same seed + same persisted state => byte-identical output.
seed = 42

[application]
# trace | debug | info | warn | error
log_level = "info"

[patients]
# Registry size created on the first run
initial_count = 100
# Patients appended per generated day (0 or less disables growth)
new_patients_per_day = 2
# Growth stops at this registry size
max_total = 5000

[encounters]
count_per_day = 160

# Relative scenario weights. Unknown scenarios use the routine profile.
[encounters.scenarios]
routine = 0.55
chest_pain = 0.20
sepsis = 0.15
copd_hypoxia = 0.10

[vitals]
# Minutes between measurements within an encounter (0 or less means 60)
frequency_minutes = 60
enabled_vital_types = [
    "heart_rate",
    "resp_rate",
    "temperature_c",
    "spo2",
    "systolic_bp",
    "diastolic_bp",
]

[vitals.source_weights]
monitor = 0.85
manual = 0.15

# Per-scenario sampling ranges. A missing scenario or vital falls back to
# the routine entry, then to the built-in routine range.
[vitals.scenario_ranges.routine]
heart_rate = { min = 60.0, max = 100.0 }
resp_rate = { min = 12.0, max = 20.0 }
temperature_c = { min = 36.3, max = 37.5 }
spo2 = { min = 95.0, max = 100.0 }
systolic_bp = { min = 105.0, max = 130.0 }
diastolic_bp = { min = 65.0, max = 85.0 }

[vitals.scenario_ranges.sepsis]
heart_rate = { min = 95.0, max = 140.0 }
resp_rate = { min = 18.0, max = 34.0 }
temperature_c = { min = 38.0, max = 40.2 }
spo2 = { min = 88.0, max = 95.0 }
systolic_bp = { min = 80.0, max = 105.0 }
diastolic_bp = { min = 45.0, max = 70.0 }

[paths]
data_dir = "data"
state_dir = "state"
warehouse_path = "warehouse/clinical.db"

[state]
# fail: abort on a malformed registry or counter
# reset: re-initialize the registry / reset the counter to 0 (may reissue IDs)
recovery = "fail"

[logging]
# Write JSON logs to local_path in addition to the console
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, RecoveryPolicy};
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "clinsynth.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "clinsynth.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_minimal_config_parses() {
        let config = parse_config(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.patients.new_patients_per_day, 2);
        assert_eq!(config.encounters.scenarios.len(), 4);
    }

    #[test]
    fn test_config_with_examples_parses() {
        let config = parse_config(&InitArgs::generate_config_with_examples()).unwrap();
        assert_eq!(config.state.recovery, RecoveryPolicy::Fail);
        assert_eq!(config.vitals.enabled_vital_types.len(), 6);
        assert_eq!(config.vitals.scenario_ranges.len(), 2);
        assert_eq!(config.encounters.scenarios["sepsis"], 0.15);
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("clinsynth.toml");
        fs::write(&output, "seed = 1\n").unwrap();

        let mut args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "seed = 1\n");

        args.force = true;
        assert_eq!(args.execute().unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[patients]"));
    }
}
