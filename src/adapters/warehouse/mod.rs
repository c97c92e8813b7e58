//! Relational warehouse for validated days
//!
//! Holds the raw patient and encounter tables as loaded, plus the curated
//! `dim_patients` and `fact_encounters` tables. Every load fully replaces
//! the tables' contents.
//!
//! ```rust
//! use clinsynth::adapters::warehouse::{SqliteWarehouse, Warehouse};
//!
//! # fn example() -> clinsynth::domain::Result<()> {
//! let mut warehouse = SqliteWarehouse::open_in_memory()?;
//! let load = warehouse.replace_patients(&[])?;
//! assert_eq!(load.committed, 0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod schema;
pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteWarehouse;
pub use traits::{TableLoad, Warehouse, WarehouseCounts};
