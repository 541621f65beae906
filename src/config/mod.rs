//! Configuration management for pax2yaml.
//!
//! # Overview
//!
//! pax2yaml uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PAX2YAML_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pax2yaml::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pax2yaml.toml")?;
//! for aoi in config.aoi.types() {
//!     println!("Exporting {aoi}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ControllerConfig`] - Driver timeout
//! - [`OutputConfig`] - Output root, layout and folder prefix
//! - [`LoggingConfig`] - Optional JSON file logging
//! - [`AoiConfig`] - AOI types, their sections and sub-tags
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [controller]
//! timeout_seconds = 10
//!
//! [output]
//! directory = "${PLANT_EXPORT_DIR}"
//! layout = "per_aoi"
//!
//! [aoi.P_DIn]
//! Status = ["Sts.Run", "Sts.Fail"]
//! Config = ["Cfg_Delay"]
//!
//! [aoi.P_AIn]
//! Value = ["Val", "Val_EUMin", "Val_EUMax"]
//! ```

pub mod aoi;
pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use aoi::{AoiConfig, AoiDefinition};
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ControllerConfig, LoggingConfig, OutputConfig, OutputLayout, PaxConfig,
};
