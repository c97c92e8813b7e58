//! Day folder verification
//!
//! Recomputes the SHA-256 of each generated CSV and compares it with the
//! value recorded in the day's `manifest.json`.

pub mod checksum;
pub mod report;
pub mod verify;

pub use report::{VerificationFailure, VerificationReport};
pub use verify::verify_day;
