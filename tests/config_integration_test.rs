//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX so they do not
//! interfere with each other.

use pax2yaml::config::{load_config, OutputLayout};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("PAX2YAML_APPLICATION_LOG_LEVEL");
    std::env::remove_var("PAX2YAML_CONTROLLER_TIMEOUT_SECONDS");
    std::env::remove_var("PAX2YAML_OUTPUT_DIRECTORY");
    std::env::remove_var("PAX2YAML_OUTPUT_LAYOUT");
    std::env::remove_var("PAX2YAML_OUTPUT_FOLDER_PREFIX");
    std::env::remove_var("TEST_PAX_EXPORT_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[controller]
timeout_seconds = 30

[output]
directory = "/data/plant"
layout = "flat"
folder_prefix = "Export_"

[logging]
local_enabled = false
local_path = "/tmp/pax2yaml"
local_rotation = "hourly"

[aoi.P_DIn]
Status = ["Sts.Run", "Sts.Fail"]
Config = ["Cfg_Delay", "Cfg_Inv"]

[aoi.P_AIn]
Value = ["Val", "Val_EUMin", "Val_EUMax"]
Alarm = ["Alm_Hi[0]", "Alm_Hi[1]"]
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.controller.timeout_seconds, 30);
    assert_eq!(config.output.directory, "/data/plant");
    assert_eq!(config.output.layout, OutputLayout::Flat);
    assert_eq!(config.output.folder_prefix, "Export_");
    assert_eq!(config.logging.local_rotation, "hourly");

    let types: Vec<&str> = config.aoi.types().map(|t| t.as_str()).collect();
    assert_eq!(types, vec!["P_DIn", "P_AIn"]);

    let (_, din) = config.aoi.iter().next().unwrap();
    let sections: Vec<(&str, usize)> = din.sections().map(|(n, t)| (n, t.len())).collect();
    assert_eq!(sections, vec![("Status", 2), ("Config", 2)]);
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[aoi.P_DIn]\nStatus = [\"Sts.Run\"]\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.controller.timeout_seconds, 10);
    assert_eq!(config.output.directory, "");
    assert_eq!(config.output.layout, OutputLayout::PerAoi);
    assert_eq!(config.output.folder_prefix, "TagData_");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution_and_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_PAX_EXPORT_DIR", "/srv/plant");
    std::env::set_var("PAX2YAML_OUTPUT_LAYOUT", "flat");
    std::env::set_var("PAX2YAML_CONTROLLER_TIMEOUT_SECONDS", "25");

    let file = write_config(
        r#"
# directory comes from ${TEST_PAX_EXPORT_DIR}
[output]
directory = "${TEST_PAX_EXPORT_DIR}"

[aoi.P_DIn]
Status = ["Sts.Run"]
"#,
    );
    let result = load_config(file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.output.directory, "/srv/plant");
    assert_eq!(config.output.layout, OutputLayout::Flat);
    assert_eq!(config.controller.timeout_seconds, 25);
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        "[output]\ndirectory = \"${TEST_PAX_EXPORT_DIR}\"\n[aoi.P_DIn]\nStatus = [\"Sts.Run\"]\n",
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_PAX_EXPORT_DIR"));
}

#[test]
fn test_invalid_configs_are_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        ("no aoi table", "[application]\nlog_level = \"info\"\n"),
        ("reserved section", "[aoi.P_DIn]\nAOI = [\"Sts.Run\"]\n"),
        ("empty section", "[aoi.P_DIn]\nStatus = []\n"),
        (
            "bad log level",
            "[application]\nlog_level = \"loud\"\n[aoi.P_DIn]\nStatus = [\"Sts.Run\"]\n",
        ),
        (
            "timeout out of range",
            "[controller]\ntimeout_seconds = 0\n[aoi.P_DIn]\nStatus = [\"Sts.Run\"]\n",
        ),
        (
            "bad layout",
            "[output]\nlayout = \"nested\"\n[aoi.P_DIn]\nStatus = [\"Sts.Run\"]\n",
        ),
        ("duplicate section", "[aoi.P_DIn]\nStatus = [\"A\"]\nStatus = [\"B\"]\n"),
    ];

    for (name, contents) in cases {
        let file = write_config(contents);
        assert!(load_config(file.path()).is_err(), "{name} should be rejected");
    }
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/pax2yaml.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
