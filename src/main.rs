// ClinSynth - Synthetic Clinical Data Generator
// Copyright (c) 2025 ClinSynth Contributors
// Licensed under the MIT License

use clinsynth::cli::{Cli, Commands};
use clinsynth::config::load_config;
use clinsynth::domain::ClinSynthError;
use clinsynth::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Logging settings come from the config when it loads; the command itself
    // reports a broken config, so fall back to console-only here
    let config = cli
        .command
        .needs_config()
        .then(|| load_config(&cli.config).ok())
        .flatten();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config.map(|c| c.logging).unwrap_or_default();

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(e.exit_code());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "ClinSynth - Synthetic Clinical Data Generator"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            e.downcast_ref::<ClinSynthError>()
                .map(ClinSynthError::exit_code)
                .unwrap_or(5)
        }
    };

    // The guard must flush before exit
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Generate(args) => args.execute(&cli.config),
        Commands::Load(args) => args.execute(&cli.config),
        Commands::Run(args) => args.execute(&cli.config),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Status(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
