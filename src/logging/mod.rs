//! Logging and observability
//!
//! Structured logging with:
//! - Console output filtered by `RUST_LOG` or the configured level
//! - Optional JSON file logging with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use pax2yaml::logging::init_logging;
//! use pax2yaml::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(aoi = "P_DIn", "Discovering instances");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a document written for one instance
///
/// # Example
///
/// ```no_run
/// use pax2yaml::log_record_written;
/// use std::path::Path;
///
/// log_record_written!("P_DIn", "Inst1", Path::new("TagData_PLC01/P_DIn/Inst1.yml"), 12);
/// ```
#[macro_export]
macro_rules! log_record_written {
    ($aoi:expr, $instance:expr, $path:expr, $values:expr) => {
        tracing::debug!(
            aoi = %$aoi,
            instance = %$instance,
            path = %$path.display(),
            values = $values,
            "Record written"
        );
    };
}

/// Log a tag the controller refused to read
///
/// # Example
///
/// ```no_run
/// use pax2yaml::log_failed_tag;
///
/// log_failed_tag!("P_DIn", "Inst1.Sts.Missing", "Path segment error");
/// ```
#[macro_export]
macro_rules! log_failed_tag {
    ($aoi:expr, $path:expr, $reason:expr) => {
        tracing::warn!(
            aoi = %$aoi,
            path = %$path,
            reason = %$reason,
            "Tag read failed"
        );
    };
}
