//! Synthetic day generation
//!
//! - [`registry`] - append-only patient registry
//! - [`encounters`] - encounter allocation with globally unique IDs
//! - [`vitals`] - scenario-driven vitals sampling
//! - [`ranges`] - layered vitals range lookup
//! - [`pipeline`] - one day end to end

pub mod encounters;
pub mod pipeline;
pub mod ranges;
pub mod registry;
pub mod rng;
pub mod summary;
pub mod vitals;

pub use encounters::{generate_day, DayAllocation, ScenarioProfile};
pub use pipeline::DailyBatchGenerator;
pub use ranges::{resolve_range, RangeSource, ResolvedRange};
pub use registry::{export_active_subset, Growth, RegistryManager};
pub use summary::GenerationSummary;
pub use vitals::VitalsSampler;
