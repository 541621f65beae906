//! Connect-only command implementation
//!
//! Runs when no subcommand is given: open a session, report the controller
//! name, close.

use crate::adapters::plc::create_driver;
use crate::config::ControllerConfig;

/// Connect to `commpath` and print the controller name
pub async fn execute(commpath: &str, config: &ControllerConfig) -> anyhow::Result<i32> {
    let mut driver = match create_driver(commpath, config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Invalid controller path: {e}");
            return Ok(2); // Configuration error exit code
        }
    };

    if let Err(e) = driver.open().await {
        tracing::error!(commpath, error = %e, "Connection failed");
        eprintln!("Failed to connect to {commpath}: {e}");
        return Ok(4); // Connection error exit code
    }

    let name = match driver.plc_name().await {
        Ok(name) => name,
        Err(e) => {
            tracing::error!(commpath, error = %e, "Failed to read controller name");
            eprintln!("Connected to {commpath}, but reading the controller name failed: {e}");
            let _ = driver.close().await;
            return Ok(4);
        }
    };

    println!("{}", super::connected_line(&name, commpath));
    println!("  Tags: {}", driver.tags().len());
    driver.close().await?;
    Ok(0)
}
