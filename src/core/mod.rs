//! Core business logic for pax2yaml.
//!
//! # Modules
//!
//! - [`discovery`] - Find AOI instances in the controller's tag database
//! - [`paths`] - Build absolute sub-tag paths for an instance
//! - [`reader`] - Batched reads with value normalization ([`normalize`])
//! - [`assemble`] - Turn read values into record sections
//! - [`export`] - Orchestration and summary
//!
//! # Export Workflow
//!
//! For each configured AOI type:
//!
//! 1. **Discover**: list instance paths, expanding arrays per element
//! 2. **Read**: for each section, read `instance.sub_tag` for every sub-tag
//! 3. **Normalize**: BOOL to 0/1, REAL rounded, other types as read
//! 4. **Assemble**: strip the instance prefix, build the record
//! 5. **Write**: one YAML document per instance
//!
//! # Example
//!
//! ```rust,no_run
//! use pax2yaml::adapters::plc::{create_driver, PlcDriver};
//! use pax2yaml::config::load_config;
//! use pax2yaml::core::export::{ExportCoordinator, ExportOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pax2yaml.toml")?;
//! let mut driver = create_driver("10.0.0.5/0", &config.controller)?;
//! driver.open().await?;
//!
//! let options = ExportOptions::from_config(&config.output);
//! let mut coordinator = ExportCoordinator::new(driver.as_mut(), &config.aoi, options);
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Records: {}", summary.records_written);
//! println!("Failed tags: {}", summary.failed_tags.len());
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod discovery;
pub mod export;
pub mod normalize;
pub mod paths;
pub mod reader;
