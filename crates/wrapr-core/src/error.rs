//! Error types shared by every resolution and invocation path.

use thiserror::Error;

use crate::context::ResolutionStep;
use crate::uri::Uri;

/// Errors that can occur while parsing, resolving, or invoking wrappers.
///
/// There is no `NotFound` variant: a resolver that does not claim a URI
/// answers [`ResolutionResult::NotFound`](crate::ResolutionResult::NotFound)
/// and the chain moves on. Every variant here aborts the remaining chain.
#[derive(Debug, Error)]
pub enum WrapError {
    /// The text could not be parsed as a wrap URI.
    #[error("invalid uri '{input}': {reason}")]
    UriParse {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A URI was entered twice within one resolution.
    #[error("infinite loop while resolving {uri}: already visited")]
    InfiniteLoop {
        /// The URI that was re-entered.
        uri: Uri,
    },

    /// A resolver's internal precondition failed.
    #[error("resolver '{resolver}' failed for {uri}: {message}")]
    Resolver {
        /// Description of the failing resolver.
        resolver: String,
        /// The URI being resolved.
        uri: Uri,
        /// What went wrong.
        message: String,
    },

    /// Resolution finished without producing a package or wrapper.
    #[error("unable to find wrapper for {uri} ({} resolution steps)", history.len())]
    UriNotFound {
        /// The URI the caller asked for.
        uri: Uri,
        /// The full resolution history.
        history: Vec<ResolutionStep>,
    },

    /// The wrapper does not expose the requested method.
    #[error("method '{method}' is not defined by {uri}")]
    MethodNotFound {
        /// The invoked wrapper.
        uri: Uri,
        /// The unknown method name.
        method: String,
    },

    /// The wrapper's own invocation logic failed.
    #[error("invocation of {uri}.{method} failed: {message}")]
    Invocation {
        /// The invoked wrapper.
        uri: Uri,
        /// The invoked method.
        method: String,
        /// Failure detail reported by the wrapper.
        message: String,
    },

    /// A manifest could not be produced or decoded.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// A wrapper does not contain the requested file.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Requested path inside the wrapper.
        path: String,
    },

    /// A resolution failed; carries the history recorded up to the failure.
    #[error("failed to resolve {uri}: {source}")]
    Resolution {
        /// The URI the caller asked for.
        uri: Uri,
        /// Steps recorded before the failure.
        history: Vec<ResolutionStep>,
        /// The underlying failure.
        #[source]
        source: Box<WrapError>,
    },
}

impl WrapError {
    /// Strip any [`WrapError::Resolution`] layers and return the failure
    /// that actually aborted the chain.
    #[must_use]
    pub fn root_cause(&self) -> &WrapError {
        match self {
            Self::Resolution { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The resolution history attached to this error, if any.
    #[must_use]
    pub fn history(&self) -> Option<&[ResolutionStep]> {
        match self {
            Self::Resolution { history, .. } | Self::UriNotFound { history, .. } => Some(history),
            _ => None,
        }
    }

    /// Build a [`WrapError::Resolver`] from any displayable cause.
    pub fn resolver(resolver: impl Into<String>, uri: &Uri, message: impl ToString) -> Self {
        Self::Resolver {
            resolver: resolver.into(),
            uri: uri.clone(),
            message: message.to_string(),
        }
    }
}

/// A specialized Result type for wrap operations.
pub type WrapResult<T> = Result<T, WrapError>;
