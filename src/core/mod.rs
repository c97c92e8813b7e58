//! Core business logic for ClinSynth.
//!
//! # Modules
//!
//! - [`generate`] - Registry, encounters and vitals for one day
//! - [`state`] - Persisted registry and encounter counter
//! - [`validation`] - Integrity gate run before any warehouse write
//! - [`transform`] - Staging of validated tables into warehouse rows
//! - [`load`] - Extract, gate, transform and commit one day
//! - [`verification`] - Manifest checksums for generated days
//!
//! # Daily Workflow
//!
//! 1. **Registry**: load or initialize the patient registry, then grow it
//! 2. **Encounters**: draw the day's encounters from the registry pool
//! 3. **Vitals**: sample events inside each encounter window
//! 4. **Write**: stage the day folder and move it into place
//! 5. **Commit**: compare-and-set the encounter counter
//! 6. **Load**: gate the folder and replace the warehouse tables
//!
//! # Example
//!
//! ```rust,no_run
//! use clinsynth::adapters::tables::DatasetMode;
//! use clinsynth::adapters::warehouse::SqliteWarehouse;
//! use clinsynth::config::load_config;
//! use clinsynth::core::generate::DailyBatchGenerator;
//! use clinsynth::core::load::WarehouseLoader;
//! use clinsynth::core::state::StateManager;
//! use chrono::NaiveDate;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("clinsynth.toml")?;
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
//!
//! let state = StateManager::from_config(&config);
//! let generator = DailyBatchGenerator::new(config.clone(), state);
//! let generated = generator.run(date, DatasetMode::Raw)?;
//! println!("Encounters: {}", generated.encounters);
//!
//! let warehouse = SqliteWarehouse::open(&config.paths.warehouse_path)?;
//! let mut loader = WarehouseLoader::new(&config.paths.data_dir, Box::new(warehouse));
//! let loaded = loader.load(date, DatasetMode::Raw)?;
//! println!("Facts: {}", loaded.encounters.committed);
//! # Ok(())
//! # }
//! ```

pub mod generate;
pub mod load;
pub mod state;
pub mod transform;
pub mod validation;
pub mod verification;
