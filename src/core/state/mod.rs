//! Persisted state shared by sequential daily runs
//!
//! Two stores survive between runs: the append-only patient registry and the
//! last allocated encounter ID. [`StateManager`] applies the configured
//! recovery policy on top of them.

pub mod atomic;
pub mod counter;
pub mod manager;
pub mod registry_store;

pub use counter::{CounterStore, FileCounterStore, MemoryCounterStore, COUNTER_FILE};
pub use manager::StateManager;
pub use registry_store::{CsvRegistryStore, MemoryRegistryStore, RegistryStore, REGISTRY_FILE};
