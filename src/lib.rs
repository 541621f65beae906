// pax2yaml - PlantPAX AOI instance export to YAML
// Copyright (c) 2025 pax2yaml Contributors
// Licensed under the MIT License

//! # pax2yaml - PlantPAX AOI instance export
//!
//! pax2yaml connects to an Allen-Bradley ControlLogix/CompactLogix controller,
//! finds every instance of the configured Add-On Instruction (AOI) types, reads
//! the configured sub-tags of each instance, and writes one YAML document per
//! instance.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Discovery, reading, normalization, assembly and export orchestration
//! - [`adapters`] - Controller drivers (Logix EtherNet/IP, snapshot) and the YAML sink
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pax2yaml::adapters::plc::{create_driver, PlcDriver};
//! use pax2yaml::config::load_config;
//! use pax2yaml::core::export::{ExportCoordinator, ExportOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("pax2yaml.toml")?;
//!
//!     let mut driver = create_driver("192.168.1.10/0", &config.controller)?;
//!     driver.open().await?;
//!
//!     let options = ExportOptions::from_config(&config.output);
//!     let summary = ExportCoordinator::new(driver.as_mut(), &config.aoi, options)
//!         .execute_export()
//!         .await?;
//!     driver.close().await?;
//!
//!     println!("Wrote {} documents", summary.records_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Output
//!
//! Given
//!
//! ```toml
//! [aoi.P_DIn]
//! Status = ["Sts.Run", "Sts.Fail"]
//! ```
//!
//! an instance `Inst1` on controller `PLC01` is written to
//! `TagData_PLC01/P_DIn/Inst1.yml`:
//!
//! ```yaml
//! AOI: P_DIn
//! Status:
//!   Sts.Run: 1
//!   Sts.Fail: 0
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::PaxError`]. A tag the controller refuses to read is not an error;
//! it is reported in the export summary.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
