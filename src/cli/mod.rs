//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ClinSynth using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ClinSynth - Synthetic Clinical Data Generator
#[derive(Parser, Debug)]
#[command(name = "clinsynth")]
#[command(version, about, long_about = None)]
#[command(author = "ClinSynth Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "clinsynth.toml", env = "CLINSYNTH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLINSYNTH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one day of synthetic data
    Generate(commands::generate::GenerateArgs),

    /// Validate one generated day and load it into the warehouse
    Load(commands::load::LoadArgs),

    /// Generate a day, then load it
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show registry, counter and warehouse status
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command runs against an existing configuration file
    pub fn needs_config(&self) -> bool {
        !matches!(self, Commands::Init(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tables::DatasetMode;
    use chrono::NaiveDate;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["clinsynth", "generate", "--date", "2024-01-05"]);
        assert_eq!(cli.config, "clinsynth.toml");
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
                assert_eq!(args.mode, DatasetMode::Raw);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_load_source() {
        let cli = Cli::parse_from(["clinsynth", "load", "--date", "2024-01-05", "--source", "sample"]);
        match cli.command {
            Commands::Load(args) => assert_eq!(args.source, DatasetMode::Sample),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        let result = Cli::try_parse_from(["clinsynth", "generate", "--date", "2024-13-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_bad_mode() {
        let result =
            Cli::try_parse_from(["clinsynth", "run", "--date", "2024-01-01", "--mode", "bronze"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["clinsynth", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["clinsynth", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["clinsynth", "init", "--force"]);
        assert!(!cli.command.needs_config());
        match cli.command {
            Commands::Init(args) => {
                assert!(args.force);
                assert_eq!(args.output, "clinsynth.toml");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
