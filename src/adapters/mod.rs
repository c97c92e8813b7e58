//! External storage for ClinSynth.
//!
//! - [`tables`] - Per-day CSV folders and their manifests
//! - [`warehouse`] - Relational warehouse (trait-based, SQLite implementation)
//!
//! # Design Pattern
//!
//! Adapters isolate file formats and the database from the core logic. The
//! warehouse sits behind the [`warehouse::Warehouse`] trait so the loader can
//! be driven against any backend, including an in-memory SQLite database in
//! tests.

pub mod tables;
pub mod warehouse;
