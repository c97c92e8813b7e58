//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels via `RUST_LOG` or the configured level
//! - Optional local JSON log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use clinsynth::logging::init_logging;
//! use clinsynth::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(date = "2024-01-01", "Generating day");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a per-day phase (generate or load)
///
/// # Example
///
/// ```no_run
/// use clinsynth::log_day_start;
///
/// log_day_start!("generate", "2024-01-01", "raw");
/// ```
#[macro_export]
macro_rules! log_day_start {
    ($phase:expr, $date:expr, $mode:expr) => {
        tracing::info!(
            phase = $phase,
            date = %$date,
            mode = %$mode,
            "Starting day"
        );
    };
}

/// Log the completion of a per-day phase with its row count and duration
///
/// # Example
///
/// ```no_run
/// use clinsynth::log_day_complete;
/// use std::time::Duration;
///
/// log_day_complete!("load", 320, Duration::from_millis(42));
/// ```
#[macro_export]
macro_rules! log_day_complete {
    ($phase:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            phase = $phase,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Day completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use clinsynth::log_error_with_context;
/// use clinsynth::domain::ClinSynthError;
///
/// let error = ClinSynthError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a state recovery (reset of a corrupted registry or counter)
///
/// # Example
///
/// ```no_run
/// use clinsynth::log_state_recovery;
///
/// log_state_recovery!("encounter_counter", "not an integer");
/// ```
#[macro_export]
macro_rules! log_state_recovery {
    ($store:expr, $reason:expr) => {
        tracing::warn!(
            store = $store,
            reason = %$reason,
            "Persisted state is malformed, resetting under recovery policy"
        );
    };
}
