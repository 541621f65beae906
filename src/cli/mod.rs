//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for pax2yaml using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// pax2yaml - export PlantPAX AOI instances to YAML
#[derive(Parser, Debug)]
#[command(name = "pax2yaml")]
#[command(version, about, long_about = None)]
#[command(author = "pax2yaml Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "pax2yaml.toml", env = "PAX2YAML_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PAX2YAML_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Controller path: host[:port][/slot], host/bp/slot, or snapshot:<file>
    pub commpath: String,

    /// Subcommand to execute; without one, connect and report the controller name
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read configured AOI instances and write one YAML file per instance
    Read(commands::read::ReadArgs),

    /// Write values from a YAML file back to the controller (not supported)
    Write(commands::write::WriteArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputLayout;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_connect_only() {
        let cli = Cli::parse_from(["pax2yaml", "10.0.0.5/2"]);
        assert_eq!(cli.config, "pax2yaml.toml");
        assert_eq!(cli.commpath, "10.0.0.5/2");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_read_with_directory() {
        let cli = Cli::parse_from(["pax2yaml", "10.0.0.5", "read", "/tmp/out"]);
        match cli.command {
            Some(Commands::Read(args)) => {
                assert_eq!(args.directory, Some(PathBuf::from("/tmp/out")));
                assert!(!args.dry_run);
                assert!(!args.strict);
            }
            other => panic!("expected read, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_read_options() {
        let cli = Cli::parse_from([
            "pax2yaml",
            "snapshot:plant.yaml",
            "read",
            "--dry-run",
            "--strict",
            "--aoi",
            "P_DIn,P_AIn",
            "--layout",
            "flat",
        ]);
        match cli.command {
            Some(Commands::Read(args)) => {
                assert!(args.directory.is_none());
                assert!(args.dry_run);
                assert!(args.strict);
                assert_eq!(args.aoi.as_deref(), Some("P_DIn,P_AIn"));
                assert_eq!(args.layout, Some(OutputLayout::Flat));
            }
            other => panic!("expected read, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_layout_aliases() {
        for layout in ["per-aoi", "per_aoi"] {
            let cli = Cli::parse_from(["pax2yaml", "plc", "read", "--layout", layout]);
            match cli.command {
                Some(Commands::Read(args)) => assert_eq!(args.layout, Some(OutputLayout::PerAoi)),
                other => panic!("expected read, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_cli_parse_write_requires_file() {
        assert!(Cli::try_parse_from(["pax2yaml", "plc", "write"]).is_err());
        let cli = Cli::parse_from(["pax2yaml", "plc", "write", "values.yml"]);
        assert!(matches!(cli.command, Some(Commands::Write(_))));
    }

    #[test]
    fn test_cli_parse_with_config_and_log_level() {
        let cli = Cli::parse_from([
            "pax2yaml",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "plc",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_requires_commpath() {
        assert!(Cli::try_parse_from(["pax2yaml"]).is_err());
    }
}
