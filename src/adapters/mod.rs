//! External system integrations for pax2yaml.
//!
//! - [`plc`] - Controller drivers behind the [`PlcDriver`](plc::PlcDriver) trait
//! - [`yaml`] - YAML document sink
//!
//! # Design Pattern
//!
//! Adapters isolate the controller protocol and the output format from the
//! export core, and let tests swap in a snapshot or fake driver.
//!
//! ```rust,no_run
//! use pax2yaml::adapters::plc::{create_driver, PlcDriver};
//! use pax2yaml::config::ControllerConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut driver = create_driver("192.168.1.10/bp/0", &ControllerConfig::default())?;
//! driver.open().await?;
//! println!("Connected to {}", driver.plc_name().await?);
//! driver.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod plc;
pub mod yaml;
