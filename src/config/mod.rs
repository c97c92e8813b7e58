//! Configuration management for ClinSynth.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! ClinSynth uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CLINSYNTH_*` environment overrides
//! - Default values for every setting
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clinsynth::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("clinsynth.toml")?;
//!
//! println!("Seed: {}", config.seed);
//! println!("Encounters per day: {}", config.encounters.count_per_day);
//! println!("Warehouse: {}", config.paths.warehouse_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`PatientsConfig`] - Registry size and growth
//! - [`EncountersConfig`] - Daily volume and scenario mix
//! - [`VitalsConfig`] - Sampling frequency, vital types, ranges, source weights
//! - [`PathsConfig`] - Data, state and warehouse locations
//! - [`StateConfig`] - Recovery policy for corrupted state
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! seed = 42
//!
//! [patients]
//! initial_count = 100
//! new_patients_per_day = 2
//! max_total = 5000
//!
//! [encounters]
//! count_per_day = 160
//!
//! [encounters.scenarios]
//! routine = 0.55
//! chest_pain = 0.20
//! sepsis = 0.15
//! copd_hypoxia = 0.10
//!
//! [vitals.scenario_ranges.sepsis]
//! heart_rate = { min = 105.0, max = 150.0 }
//!
//! [paths]
//! data_dir = "${CLINSYNTH_HOME}/data"
//! ```
//!
//! Ranges not listed fall back to the routine entry and then to the built-in
//! table, see [`crate::core::generate::ranges::resolve_range`].

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ClinSynthConfig, EncountersConfig, LoggingConfig, PathsConfig,
    PatientsConfig, RecoveryPolicy, ScenarioRanges, SourceWeights, StateConfig, VitalsConfig,
};
