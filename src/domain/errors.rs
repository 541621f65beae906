//! Domain error types
//!
//! This module defines the error hierarchy for pax2yaml.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main pax2yaml error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum PaxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Controller/driver errors
    #[error("Controller error: {0}")]
    Controller(#[from] ControllerError),

    /// Malformed tag address
    #[error("Invalid tag path: {0}")]
    TagPath(String),

    /// A tag could not be read and the run was asked to stop on read failures
    #[error("Read error: {0}")]
    Read(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl PaxError {
    /// Whether this error means the controller could not be reached at all
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            PaxError::Controller(
                ControllerError::ConnectionFailed(_)
                    | ControllerError::Timeout(_)
                    | ControllerError::NotConnected
            )
        )
    }
}

/// Controller-specific errors
///
/// Errors raised by a [`PlcDriver`](crate::adapters::plc::PlcDriver)
/// implementation. Per-tag failures are not errors; they are reported on the
/// individual reading.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Failed to connect to the controller
    #[error("Failed to connect to controller: {0}")]
    ConnectionFailed(String),

    /// No reply within the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Reply could not be decoded
    #[error("Invalid response from controller: {0}")]
    InvalidResponse(String),

    /// The controller refused a request the driver cannot do without
    #[error("{service} failed: {message}")]
    ServiceFailed {
        service: &'static str,
        message: String,
    },

    /// Operation issued before `open()`
    #[error("Driver is not connected")]
    NotConnected,

    /// Snapshot file missing or malformed
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for PaxError {
    fn from(err: std::io::Error) -> Self {
        PaxError::Io(err.to_string())
    }
}

// Conversion from serde_yaml::Error
impl From<serde_yaml::Error> for PaxError {
    fn from(err: serde_yaml::Error) -> Self {
        PaxError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PaxError {
    fn from(err: toml::de::Error) -> Self {
        PaxError::Configuration(format!("TOML parse error: {err}"))
    }
}
