use std::io;

use thiserror::Error;

use wrapr_core::{Uri, WrapError};

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required input was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `remove_wrapper` was asked to remove a wrapper that is not registered.
    #[error("wrapper {uri} is not registered")]
    WrapperNotFound {
        /// The URI that was not found.
        uri: Uri,
    },

    /// The builder's internal state does not allow the operation.
    #[error("illegal builder state: {0}")]
    IllegalState(String),

    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadError {
        /// Path to the config file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file at {path}: {source}")]
    ParseError {
        /// Path to the config file that failed to parse.
        path: String,
        /// Underlying TOML parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A URI in the configuration could not be parsed.
    #[error("invalid uri in config: {0}")]
    InvalidUri(#[from] WrapError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
