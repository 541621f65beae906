//! `tracing` subscriber setup
//!
//! Diagnostics always go to stderr, leaving stdout to the operator-facing
//! report (connection line, per-AOI notices, run summary). With
//! `logging.local_enabled` a JSON file layer is added next to it.

use crate::config::LoggingConfig;
use crate::domain::{PaxError, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const LOG_FILE_PREFIX: &str = "pax2yaml";
const LOG_FILE_SUFFIX: &str = "log";

/// Keeps the non-blocking file writer alive; drop it last so buffered
/// records reach the disk
pub struct LoggingGuard {
    file: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether records are also written to a log file
    pub fn is_file_logging(&self) -> bool {
        self.file.is_some()
    }
}

/// Installs the global subscriber
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// ```no_run
/// use pax2yaml::config::LoggingConfig;
/// use pax2yaml::logging::init_logging;
///
/// let guard = init_logging("info", &LoggingConfig::default()).unwrap();
/// # drop(guard);
/// ```
///
/// # Errors
///
/// Unknown level names and an uncreatable log directory are configuration
/// errors.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_level(level)?;

    let mut layers: Vec<BoxedLayer> = vec![tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter(level))
        .boxed()];

    let file = if config.local_enabled {
        let (layer, guard) = json_file_layer(config, level)?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).init();
    tracing::debug!(
        level = %level,
        file = config.local_enabled.then_some(config.local_path.as_str()),
        "Logging initialized"
    );

    Ok(LoggingGuard { file })
}

fn parse_level(level: &str) -> Result<Level> {
    level.trim().parse::<Level>().map_err(|_| {
        PaxError::Configuration(format!(
            "Invalid log level '{level}'. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{LOG_FILE_PREFIX}={level}")))
}

fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        _ => Rotation::DAILY,
    }
}

fn json_file_layer(config: &LoggingConfig, level: Level) -> Result<(BoxedLayer, WorkerGuard)> {
    let directory = Path::new(&config.local_path);
    std::fs::create_dir_all(directory).map_err(|e| {
        PaxError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            directory.display()
        ))
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(rotation(&config.local_rotation))
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(directory)
        .map_err(|e| PaxError::Configuration(format!("Failed to open log file: {e}")))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(false)
        .with_writer(writer)
        .with_filter(env_filter(level))
        .boxed();
    Ok((layer, guard))
}
