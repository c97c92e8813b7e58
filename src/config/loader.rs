//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ClinSynthConfig;
use crate::domain::errors::ClinSynthError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ClinSynthConfig
/// 4. Applies environment variable overrides (CLINSYNTH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ClinSynthError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, an override
/// has the wrong type, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use clinsynth::config::loader::load_config;
///
/// let config = load_config("clinsynth.toml").expect("Failed to load config");
/// println!("seed = {}", config.seed);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ClinSynthConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ClinSynthError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ClinSynthError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// Split out from [`load_config`] so callers holding the TOML in memory
/// (tests, `init` round-trips) go through the same steps.
pub fn parse_config(contents: &str) -> Result<ClinSynthConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ClinSynthConfig = toml::from_str(&contents)
        .map_err(|e| ClinSynthError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ClinSynthError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ClinSynthError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ClinSynthError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Reads and parses an override variable, if set
fn env_override<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            ClinSynthError::Configuration(format!("Invalid value '{raw}' for {name}: {e}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using CLINSYNTH_* prefix
///
/// Environment variables follow the pattern: CLINSYNTH_<SECTION>_<KEY>.
/// Unlike `${VAR}` placeholders these are optional, but a value that does
/// not parse is an error rather than silently ignored.
fn apply_env_overrides(config: &mut ClinSynthConfig) -> Result<()> {
    if let Some(val) = env_override("CLINSYNTH_SEED")? {
        config.seed = val;
    }
    if let Some(val) = env_override("CLINSYNTH_APPLICATION_LOG_LEVEL")? {
        config.application.log_level = val;
    }

    // Patients
    if let Some(val) = env_override("CLINSYNTH_PATIENTS_INITIAL_COUNT")? {
        config.patients.initial_count = val;
    }
    if let Some(val) = env_override("CLINSYNTH_PATIENTS_NEW_PATIENTS_PER_DAY")? {
        config.patients.new_patients_per_day = val;
    }
    if let Some(val) = env_override("CLINSYNTH_PATIENTS_MAX_TOTAL")? {
        config.patients.max_total = val;
    }

    // Encounters and vitals
    if let Some(val) = env_override("CLINSYNTH_ENCOUNTERS_COUNT_PER_DAY")? {
        config.encounters.count_per_day = val;
    }
    if let Some(val) = env_override("CLINSYNTH_VITALS_FREQUENCY_MINUTES")? {
        config.vitals.frequency_minutes = val;
    }

    // Paths
    if let Some(val) = env_override("CLINSYNTH_PATHS_DATA_DIR")? {
        config.paths.data_dir = val;
    }
    if let Some(val) = env_override("CLINSYNTH_PATHS_STATE_DIR")? {
        config.paths.state_dir = val;
    }
    if let Some(val) = env_override("CLINSYNTH_PATHS_WAREHOUSE_PATH")? {
        config.paths.warehouse_path = val;
    }

    if let Some(val) = env_override("CLINSYNTH_STATE_RECOVERY")? {
        config.state.recovery = val;
    }

    // Logging
    if let Some(val) = env_override("CLINSYNTH_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("CLINSYNTH_LOGGING_LOCAL_PATH")? {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CLINSYNTH_LOADER_TEST_DIR", "/tmp/clinsynth");
        let input = "data_dir = \"${CLINSYNTH_LOADER_TEST_DIR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "data_dir = \"/tmp/clinsynth\"");
        std::env::remove_var("CLINSYNTH_LOADER_TEST_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CLINSYNTH_LOADER_MISSING");
        let input = "state_dir = \"${CLINSYNTH_LOADER_MISSING}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CLINSYNTH_LOADER_MISSING"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("CLINSYNTH_LOADER_COMMENTED");
        let input = "# state_dir = \"${CLINSYNTH_LOADER_COMMENTED}\"\nseed = 1";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${CLINSYNTH_LOADER_COMMENTED}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-clinsynth.toml");
        assert!(matches!(result, Err(ClinSynthError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
seed = 7

[patients]
initial_count = 3
new_patients_per_day = 1
max_total = 10

[encounters]
count_per_day = 2

[encounters.scenarios]
routine = 1.0

[vitals]
frequency_minutes = 30
enabled_vital_types = ["heart_rate", "spo2"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.patients.initial_count, 3);
        assert_eq!(config.encounters.scenarios.len(), 1);
        assert_eq!(config.vitals.enabled_vital_types.len(), 2);
    }

    #[test]
    fn test_parse_config_rejects_invalid_weight() {
        let toml_content = "[encounters.scenarios]\nroutine = -1.0\n";
        let err = parse_config(toml_content).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
