//! Read command implementation
//!
//! This module implements the `read` command: export every configured AOI
//! instance on the controller to YAML documents.

use crate::adapters::plc::create_driver;
use crate::config::{OutputLayout, PaxConfig};
use crate::core::export::{ExportCoordinator, ExportOptions};
use crate::domain::AoiType;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the read command
#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Output root directory (defaults to output.directory, then the current directory)
    pub directory: Option<PathBuf>,

    /// Dry run mode - discover and read, but write no files
    #[arg(long)]
    pub dry_run: bool,

    /// Abort on the first tag the controller cannot read
    #[arg(long)]
    pub strict: bool,

    /// Override AOI type(s) to export (comma-separated)
    #[arg(long)]
    pub aoi: Option<String>,

    /// Override output layout
    #[arg(long, value_enum)]
    pub layout: Option<OutputLayout>,
}

impl ReadArgs {
    /// Apply command-line overrides to the loaded configuration
    fn apply_overrides(&self, config: &mut PaxConfig) -> Result<(), String> {
        if let Some(directory) = &self.directory {
            tracing::info!(
                directory = %directory.display(),
                "Overriding output directory from CLI"
            );
            config.output.directory = directory.to_string_lossy().into_owned();
        }

        if let Some(layout) = self.layout {
            tracing::info!(layout = %layout, "Overriding output layout from CLI");
            config.output.layout = layout;
        }

        if let Some(names) = &self.aoi {
            let names = names
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(AoiType::new)
                .collect::<Result<Vec<_>, _>>()?;
            tracing::info!(aoi = ?names, "Restricting AOI types from CLI");
            config.aoi.restrict_to(&names)?;
        }

        Ok(())
    }

    /// Execute the read command
    pub async fn execute(&self, commpath: &str, mut config: PaxConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting read command");

        if let Err(e) = self.apply_overrides(&mut config) {
            tracing::error!(error = %e, "Invalid command-line override");
            eprintln!("Configuration error: {e}");
            return Ok(2); // Configuration error exit code
        }

        let mut driver = match create_driver(commpath, &config.controller) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        if let Err(e) = driver.open().await {
            tracing::error!(commpath, error = %e, "Connection failed");
            eprintln!("Failed to connect to {commpath}: {e}");
            return Ok(4); // Connection error exit code
        }

        match driver.plc_name().await {
            Ok(name) => println!("{}", super::connected_line(&name, commpath)),
            Err(e) => {
                tracing::error!(commpath, error = %e, "Failed to read controller name");
                eprintln!("Failed to connect to {commpath}: {e}");
                let _ = driver.close().await;
                return Ok(4);
            }
        }

        if self.dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("DRY RUN MODE - No files will be written");
            println!();
        }

        let mut options = ExportOptions::from_config(&config.output);
        options.dry_run = self.dry_run;
        options.strict = self.strict;
        options.show_progress = true;

        let result = ExportCoordinator::new(driver.as_mut(), &config.aoi, options)
            .execute_export()
            .await;
        if let Err(e) = driver.close().await {
            tracing::warn!(error = %e, "Failed to close controller session");
        }

        let summary = match result {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("Export Summary:");
        println!("  Controller: {}", summary.controller);
        println!("  AOI types exported: {}", summary.aoi_types_processed);
        println!("  AOI types without instances: {}", summary.aoi_types_skipped);
        println!("  Instances: {}", summary.instances_found);
        println!("  Files written: {}", summary.records_written);
        println!("  Tags read: {}", summary.tags_read);
        println!("  Failed tags: {}", summary.failed_tags.len());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        let exit_code = if summary.is_successful() {
            println!("Export completed successfully!");
            0
        } else {
            println!("Export completed with failed tags");
            1 // Partial success
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    const CONFIG: &str = r#"
[aoi.P_DIn]
Status = ["Sts.Run"]

[aoi.P_AIn]
Value = ["Val"]
"#;

    fn args() -> ReadArgs {
        ReadArgs {
            directory: None,
            dry_run: false,
            strict: false,
            aoi: None,
            layout: None,
        }
    }

    #[test]
    fn test_overrides_directory_and_layout() {
        let mut config = parse_config(CONFIG).unwrap();
        let args = ReadArgs {
            directory: Some(PathBuf::from("/srv/export")),
            layout: Some(OutputLayout::Flat),
            ..args()
        };

        args.apply_overrides(&mut config).unwrap();
        assert_eq!(config.output.directory, "/srv/export");
        assert_eq!(config.output.layout, OutputLayout::Flat);
    }

    #[test]
    fn test_aoi_restriction() {
        let mut config = parse_config(CONFIG).unwrap();
        let args = ReadArgs {
            aoi: Some("P_AIn".to_string()),
            ..args()
        };

        args.apply_overrides(&mut config).unwrap();
        let types: Vec<&str> = config.aoi.types().map(AoiType::as_str).collect();
        assert_eq!(types, vec!["P_AIn"]);
    }

    #[test]
    fn test_unknown_aoi_is_rejected() {
        let mut config = parse_config(CONFIG).unwrap();
        let args = ReadArgs {
            aoi: Some("P_Motor".to_string()),
            ..args()
        };

        assert!(args.apply_overrides(&mut config).is_err());
    }
}
