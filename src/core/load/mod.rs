//! Warehouse loading
//!
//! - [`loader`] - one day from folder to warehouse
//! - [`summary`] - what a load did

pub mod loader;
pub mod summary;

pub use loader::WarehouseLoader;
pub use summary::LoadSummary;
