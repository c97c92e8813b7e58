// ClinSynth - Synthetic Clinical Data Generator
// Copyright (c) 2025 ClinSynth Contributors
// Licensed under the MIT License

//! # ClinSynth - Synthetic Clinical Data Generator
//!
//! ClinSynth produces a reproducible, daily stream of synthetic hospital data
//! (patients, encounters and bedside vital signs) and loads each day into a
//! validated relational warehouse.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Generating** a patient registry that grows day by day
//! - **Allocating** encounters with globally unique, increasing IDs
//! - **Sampling** scenario-driven vital signs inside each encounter window
//! - **Validating** every day against an integrity gate before loading
//! - **Loading** patient and encounter tables into SQLite with reconciliation
//!
//! ## Architecture
//!
//! ClinSynth follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (generate, validate, transform, load, state)
//! - [`adapters`] - Day folders and the warehouse
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clinsynth::adapters::tables::DatasetMode;
//! use clinsynth::config::load_config;
//! use clinsynth::core::generate::DailyBatchGenerator;
//! use clinsynth::core::state::StateManager;
//! use chrono::NaiveDate;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("clinsynth.toml")?;
//!     let state = StateManager::from_config(&config);
//!
//!     let generator = DailyBatchGenerator::new(config, state);
//!     let date = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
//!     let summary = generator.run(date, DatasetMode::Raw)?;
//!
//!     println!("Generated {} encounters", summary.encounters);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Determinism
//!
//! Every random draw comes from a per-component stream derived from the
//! configured seed. The same seed and the same persisted state give
//! byte-identical day folders; each folder's `manifest.json` records the
//! SHA-256 of its tables so a reproduction can be checked.
//!
//! ### Sequential Days
//!
//! The registry and the last encounter ID persist in `state_dir` between runs:
//!
//! ```rust,no_run
//! use clinsynth::core::state::{FileCounterStore, CounterStore};
//!
//! # fn example() -> clinsynth::domain::Result<()> {
//! let counter = FileCounterStore::in_dir("state");
//! let last = counter.get()?;
//! println!("Next encounter ID: {}", last.next());
//! # Ok(())
//! # }
//! ```
//!
//! ### Integrity Gate
//!
//! Before anything reaches the warehouse, the day's tables must pass
//! required-field, referential, identity and temporal checks:
//!
//! ```rust,no_run
//! use clinsynth::adapters::tables::read_day;
//! use clinsynth::core::validation::run_gate;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let raw = read_day(Path::new("data/raw/2024-01-01"))?;
//! let validated = run_gate(&raw)?;
//! println!("Vitals checked: {}", validated.report.vitals_checked);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ClinSynth uses the [`domain::ClinSynthError`] type for all errors:
//!
//! ```rust,no_run
//! use clinsynth::domain::ClinSynthError;
//!
//! fn example() -> Result<(), ClinSynthError> {
//!     // Errors are automatically converted using the ? operator
//!     let _config = clinsynth::config::load_config("clinsynth.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! ClinSynth uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(date = "2024-01-01", "Starting day");
//! warn!(store = "encounter_counter", "Resetting malformed counter");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
