// pax2yaml - PlantPAX AOI instance export to YAML
// Copyright (c) 2025 pax2yaml Contributors
// Licensed under the MIT License

use clap::Parser;
use pax2yaml::cli::commands::connect;
use pax2yaml::cli::{Cli, Commands};
use pax2yaml::config::{load_config, PaxConfig};
use pax2yaml::logging::init_logging;
use std::path::Path;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Only `read` needs the AOI table; the other commands run without a file
    let needs_config = matches!(cli.command, Some(Commands::Read(_)));
    let config = if needs_config || Path::new(&cli.config).exists() {
        match load_config(&cli.config) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("{e}");
                process::exit(2); // Configuration error exit code
            }
        }
    } else {
        None
    };

    let log_level = cli
        .log_level
        .as_deref()
        .or(config.as_ref().map(|c| c.application.log_level.as_str()))
        .unwrap_or("info");
    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        file_logging = guard.is_file_logging(),
        "pax2yaml - PlantPAX AOI export"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: Option<PaxConfig>) -> anyhow::Result<i32> {
    match (&cli.command, config) {
        (Some(Commands::Read(args)), Some(config)) => args.execute(&cli.commpath, config).await,
        (Some(Commands::Read(_)), None) => {
            anyhow::bail!("read requires a configuration file")
        }
        (Some(Commands::Write(args)), _) => args.execute(&cli.commpath).await,
        (None, config) => {
            let controller = config.map(|c| c.controller).unwrap_or_default();
            connect::execute(&cli.commpath, &controller).await
        }
    }
}
