//! Domain models and types for ClinSynth.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`EncounterId`])
//! - **Table rows** ([`Patient`], [`Encounter`], [`VitalEvent`])
//! - **Error types** ([`ClinSynthError`], [`ValidationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers are newtypes so a patient ID can never be passed where an
//! encounter ID is expected:
//!
//! ```rust
//! use clinsynth::domain::{EncounterId, PatientId};
//!
//! let patient = PatientId::new(12);
//! let encounter = EncounterId::new(12);
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: PatientId = encounter;
//! assert_eq!(patient.value(), encounter.value());
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ClinSynthError>`]:
//!
//! ```rust
//! use clinsynth::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let _config = clinsynth::config::load_config("clinsynth.toml")?;
//!     Ok(())
//! }
//! ```

pub mod encounter;
pub mod errors;
pub mod ids;
pub mod patient;
pub mod result;
pub mod timestamp;
pub mod vital;

// Re-export commonly used types for convenience
pub use encounter::{Acuity, Encounter};
pub use errors::{ClinSynthError, DayTable, ValidationError};
pub use ids::{EncounterId, PatientId};
pub use patient::{Patient, Sex};
pub use result::Result;
pub use vital::{VitalEvent, VitalRange, VitalSource, VitalType};
