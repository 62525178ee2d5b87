//! Telemetry error types.

use thiserror::Error;

/// Errors raised while installing a subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log configuration could not be turned into a filter or writer.
    #[error("invalid log configuration: {0}")]
    ConfigError(String),

    /// A global subscriber is already installed, or installing one failed.
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    /// Preparing a log directory failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
