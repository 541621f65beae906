//! Driver factory
//!
//! Chooses a driver implementation from the connection path given on the
//! command line.

use super::logix::endpoint::ConnectionPath;
use super::logix::LogixDriver;
use super::snapshot::{SnapshotDriver, SNAPSHOT_SCHEME};
use super::traits::PlcDriver;
use crate::config::ControllerConfig;
use crate::domain::{PaxError, Result};
use std::time::Duration;

/// Create a driver for `commpath`
///
/// `snapshot:<file>` selects the snapshot driver; anything else is parsed as
/// an EtherNet/IP connection path (`host[:port][/slot]`, `host/bp/slot`).
/// The driver is returned unopened.
///
/// # Errors
///
/// Returns a configuration error if the connection path cannot be parsed
pub fn create_driver(commpath: &str, config: &ControllerConfig) -> Result<Box<dyn PlcDriver>> {
    if let Some(file) = commpath.strip_prefix(SNAPSHOT_SCHEME) {
        if file.is_empty() {
            return Err(PaxError::Configuration(
                "snapshot: connection path needs a file name".to_string(),
            ));
        }
        tracing::info!(file, "Using snapshot driver");
        return Ok(Box::new(SnapshotDriver::from_file(file)));
    }

    let path: ConnectionPath = commpath.parse().map_err(PaxError::Configuration)?;
    tracing::info!(controller = %path, "Using Logix EtherNet/IP driver");
    Ok(Box::new(LogixDriver::new(
        path,
        Duration::from_secs(config.timeout_seconds),
    )))
}
