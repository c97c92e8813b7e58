//! CLI command implementations
//!
//! Commands return `anyhow::Result<i32>`; expected failures are reported on
//! stderr and mapped to an exit code here rather than propagated.

pub mod generate;
pub mod init;
pub mod load;
pub mod run;
pub mod status;
pub mod validate;

use crate::config::{load_config, ClinSynthConfig};
use crate::domain::ClinSynthError;
use crate::log_error_with_context;

/// Loads the configuration, or reports why not and returns the exit code
pub(crate) fn load_or_report(config_path: &str) -> Result<ClinSynthConfig, i32> {
    load_config(config_path).map_err(|e| report_failure("Failed to load configuration", &e))
}

/// Logs and prints a failure, returning its exit code
pub(crate) fn report_failure(context: &str, error: &ClinSynthError) -> i32 {
    log_error_with_context!(error, context);
    eprintln!("❌ {context}");
    eprintln!("   Error: {error}");
    error.exit_code()
}
