//! Configuration schema types
//!
//! This module defines the typed configuration structure for ClinSynth. Every
//! section has explicit defaults; values that can be defaulted are tolerated
//! rather than rejected, and `validate()` only fails for values no default can
//! repair.

use crate::core::generate::ranges::builtin_scenario_ranges;
use crate::domain::{VitalRange, VitalType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Configured vitals ranges: scenario name → vital type → bounds
pub type ScenarioRanges = BTreeMap<String, BTreeMap<VitalType, VitalRange>>;

/// Main ClinSynth configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinSynthConfig {
    /// Base seed every generator stream is derived from
    #[serde(default = "default_seed")]
    pub seed: i64,

    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Patient registry settings
    #[serde(default)]
    pub patients: PatientsConfig,

    /// Encounter generation settings
    #[serde(default)]
    pub encounters: EncountersConfig,

    /// Vitals sampling settings
    #[serde(default)]
    pub vitals: VitalsConfig,

    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Persisted state handling
    #[serde(default)]
    pub state: StateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClinSynthConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.encounters.validate()?;
        self.vitals.validate()?;
        self.paths.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for ClinSynthConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            application: ApplicationConfig::default(),
            patients: PatientsConfig::default(),
            encounters: EncountersConfig::default(),
            vitals: VitalsConfig::default(),
            paths: PathsConfig::default(),
            state: StateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Patient registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientsConfig {
    /// Registry size when no registry has been persisted yet
    #[serde(default = "default_initial_count")]
    pub initial_count: usize,

    /// Patients added per generated day (values <= 0 disable growth)
    #[serde(default)]
    pub new_patients_per_day: i64,

    /// Growth stops once the registry reaches this size
    #[serde(default = "default_max_total")]
    pub max_total: usize,
}

impl Default for PatientsConfig {
    fn default() -> Self {
        Self {
            initial_count: default_initial_count(),
            new_patients_per_day: 0,
            max_total: default_max_total(),
        }
    }
}

/// Encounter generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncountersConfig {
    /// Encounters generated per day
    #[serde(default = "default_count_per_day")]
    pub count_per_day: usize,

    /// Scenario name → relative weight
    #[serde(default = "default_scenarios")]
    pub scenarios: BTreeMap<String, f64>,
}

impl EncountersConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, weight) in &self.scenarios {
            if name.trim().is_empty() {
                return Err("encounters.scenarios contains an empty scenario name".to_string());
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(format!(
                    "encounters.scenarios.{name} must be a finite weight >= 0, got {weight}"
                ));
            }
        }
        Ok(())
    }

    /// Scenario weights with the documented default applied to an empty map
    pub fn effective_scenarios(&self) -> BTreeMap<String, f64> {
        if self.scenarios.is_empty() {
            default_scenarios()
        } else {
            self.scenarios.clone()
        }
    }
}

impl Default for EncountersConfig {
    fn default() -> Self {
        Self {
            count_per_day: default_count_per_day(),
            scenarios: default_scenarios(),
        }
    }
}

/// Weights for the monitor/manual source draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceWeights {
    #[serde(default = "default_monitor_weight")]
    pub monitor: f64,

    #[serde(default = "default_manual_weight")]
    pub manual: f64,
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self {
            monitor: default_monitor_weight(),
            manual: default_manual_weight(),
        }
    }
}

/// Vitals sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsConfig {
    /// Minutes between measurement steps (values <= 0 fall back to 60)
    #[serde(default = "default_frequency_minutes")]
    pub frequency_minutes: i64,

    /// Vital types emitted at each step, in order
    #[serde(default = "default_enabled_vital_types")]
    pub enabled_vital_types: Vec<VitalType>,

    /// Per-scenario sampling ranges
    #[serde(default = "builtin_scenario_ranges")]
    pub scenario_ranges: ScenarioRanges,

    /// Source label weights
    #[serde(default)]
    pub source_weights: SourceWeights,
}

impl VitalsConfig {
    fn validate(&self) -> Result<(), String> {
        for (scenario, ranges) in &self.scenario_ranges {
            for (vital_type, range) in ranges {
                if !range.is_valid() {
                    return Err(format!(
                        "vitals.scenario_ranges.{scenario}.{vital_type} must have finite min <= max, got [{}, {}]",
                        range.min, range.max
                    ));
                }
            }
        }

        let weights = self.source_weights;
        for (name, weight) in [("monitor", weights.monitor), ("manual", weights.manual)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!(
                    "vitals.source_weights.{name} must be a finite weight >= 0, got {weight}"
                ));
            }
        }

        Ok(())
    }

    /// Step length with the documented default applied to non-positive values
    pub fn effective_frequency_minutes(&self) -> i64 {
        if self.frequency_minutes <= 0 {
            default_frequency_minutes()
        } else {
            self.frequency_minutes
        }
    }

    /// Enabled types with the documented default applied to an empty list
    pub fn effective_vital_types(&self) -> Vec<VitalType> {
        if self.enabled_vital_types.is_empty() {
            default_enabled_vital_types()
        } else {
            self.enabled_vital_types.clone()
        }
    }
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            frequency_minutes: default_frequency_minutes(),
            enabled_vital_types: default_enabled_vital_types(),
            scenario_ranges: builtin_scenario_ranges(),
            source_weights: SourceWeights::default(),
        }
    }
}

/// Filesystem locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root of the `raw/` and `sample/` day folders
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory holding the registry and encounter counter
    #[serde(default = "default_state_dir")]
    pub state_dir: String,

    /// SQLite warehouse file
    #[serde(default = "default_warehouse_path")]
    pub warehouse_path: String,
}

impl PathsConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("data_dir", &self.data_dir),
            ("state_dir", &self.state_dir),
            ("warehouse_path", &self.warehouse_path),
        ] {
            if value.trim().is_empty() {
                return Err(format!("paths.{name} cannot be empty"));
            }
        }
        Ok(())
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            state_dir: default_state_dir(),
            warehouse_path: default_warehouse_path(),
        }
    }
}

/// What to do when persisted state cannot be parsed
///
/// One policy covers both the registry and the encounter counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryPolicy {
    /// Abort the run with a state-corruption error
    #[default]
    Fail,
    /// Counter restarts at 0 and the registry is re-initialized
    Reset,
}

impl fmt::Display for RecoveryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryPolicy::Fail => f.write_str("fail"),
            RecoveryPolicy::Reset => f.write_str("reset"),
        }
    }
}

impl FromStr for RecoveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(RecoveryPolicy::Fail),
            "reset" => Ok(RecoveryPolicy::Reset),
            other => Err(format!(
                "Invalid recovery policy '{other}'. Expected 'fail' or 'reset'"
            )),
        }
    }
}

/// State management configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StateConfig {
    /// Recovery policy for corrupted registry or counter files
    #[serde(default)]
    pub recovery: RecoveryPolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_seed() -> i64 {
    42
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_initial_count() -> usize {
    100
}

fn default_max_total() -> usize {
    5000
}

fn default_count_per_day() -> usize {
    160
}

/// Default scenario mix
pub fn default_scenarios() -> BTreeMap<String, f64> {
    [
        ("routine", 0.55),
        ("chest_pain", 0.20),
        ("sepsis", 0.15),
        ("copd_hypoxia", 0.10),
    ]
    .into_iter()
    .map(|(name, weight)| (name.to_string(), weight))
    .collect()
}

fn default_frequency_minutes() -> i64 {
    60
}

fn default_enabled_vital_types() -> Vec<VitalType> {
    VitalType::DEFAULT_ENABLED.to_vec()
}

fn default_monitor_weight() -> f64 {
    0.85
}

fn default_manual_weight() -> f64 {
    0.15
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_state_dir() -> String {
    "state".to_string()
}

fn default_warehouse_path() -> String {
    "warehouse/clinical.db".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
