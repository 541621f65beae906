//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{OutputLayout, PaxConfig};
use crate::domain::errors::PaxError;
use crate::domain::result::Result;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PaxConfig
/// 4. Applies environment variable overrides (PAX2YAML_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use pax2yaml::config::loader::load_config;
///
/// let config = load_config("pax2yaml.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PaxConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PaxError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PaxError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;

    tracing::debug!(
        path = %path.display(),
        aoi_types = config.aoi.len(),
        "Configuration loaded"
    );

    Ok(config)
}

/// Parses and validates configuration text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn parse_config(contents: &str) -> Result<PaxConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: PaxConfig = toml::from_str(&contents)
        .map_err(|e| PaxError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        PaxError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// `${VAR}` reference
const ENV_REFERENCE: &str = r"\$\{([A-Z_][A-Z0-9_]*)\}";

/// Replaces `${VAR}` references with the variable's value
///
/// Comment lines are left alone so commented-out settings may reference
/// variables that are not set.
///
/// # Errors
///
/// Lists every referenced variable that is not set.
fn substitute_env_vars(input: &str) -> Result<String> {
    let pattern = Regex::new(ENV_REFERENCE)
        .map_err(|e| PaxError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut missing: Vec<String> = Vec::new();

    let lines: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            pattern
                .replace_all(line, |caps: &Captures| {
                    std::env::var(&caps[1]).unwrap_or_else(|_| {
                        if !missing.iter().any(|v| v == &caps[1]) {
                            missing.push(caps[1].to_string());
                        }
                        String::new()
                    })
                })
                .into_owned()
        })
        .collect();

    if !missing.is_empty() {
        return Err(PaxError::Configuration(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    Ok(output)
}

/// Applies environment variable overrides using PAX2YAML_* prefix
///
/// Environment variables follow the pattern: PAX2YAML_<SECTION>_<KEY>,
/// for example PAX2YAML_OUTPUT_DIRECTORY. The AOI table has no overrides.
fn apply_env_overrides(config: &mut PaxConfig) -> Result<()> {
    if let Ok(val) = std::env::var("PAX2YAML_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("PAX2YAML_CONTROLLER_TIMEOUT_SECONDS") {
        config.controller.timeout_seconds = val.parse().map_err(|_| {
            PaxError::Configuration(format!(
                "PAX2YAML_CONTROLLER_TIMEOUT_SECONDS must be an integer, got '{val}'"
            ))
        })?;
    }

    if let Ok(val) = std::env::var("PAX2YAML_OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }
    if let Ok(val) = std::env::var("PAX2YAML_OUTPUT_LAYOUT") {
        config.output.layout = match val.as_str() {
            "flat" => OutputLayout::Flat,
            "per_aoi" | "per-aoi" => OutputLayout::PerAoi,
            other => {
                return Err(PaxError::Configuration(format!(
                    "PAX2YAML_OUTPUT_LAYOUT must be 'flat' or 'per_aoi', got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("PAX2YAML_OUTPUT_FOLDER_PREFIX") {
        config.output.folder_prefix = val;
    }

    if let Ok(val) = std::env::var("PAX2YAML_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PAX2YAML_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PAX2YAML_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
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
        std::env::set_var("PAX_LOADER_TEST_VAR", "plant_a");
        let input = "directory = \"${PAX_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "directory = \"plant_a\"\n");
        std::env::remove_var("PAX_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("PAX_LOADER_MISSING_VAR");
        let input = "directory = \"${PAX_LOADER_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("PAX_LOADER_COMMENTED_VAR");
        let input = "# directory = \"${PAX_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(PaxError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[output]
layout = "flat"

[aoi.P_DIn]
Status = ["Sts.Run", "Sts.Fail"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.output.layout, OutputLayout::Flat);
        assert_eq!(config.aoi.len(), 1);
    }

    #[test]
    fn test_parse_config_without_aoi_fails_validation() {
        let err = parse_config("[application]\nlog_level = \"info\"\n").unwrap_err();
        assert!(err.to_string().contains("aoi"));
    }
}
