//! Engine error types.

use std::path::PathBuf;

/// Error returned by the markup engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A configuration value is outside the range the engine accepts.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
    /// Filter name has no registered implementation.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),
    /// Hook name has no registered implementation.
    #[error("Unknown hook: {0}")]
    UnknownHook(String),
    /// A resource file was found but could not be read or parsed.
    #[error("Failed to load resource {}: {message}", .path.display())]
    Resource {
        /// Path of the offending resource file.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },
    /// A host helper call failed during rendering.
    #[error("Helper call failed: {0}")]
    Helper(#[from] HelperError),
}

/// Error returned when a host rendering helper cannot be invoked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HelperError {
    /// Helper is not in the allowlist handed to the engine.
    #[error("Helper {0} is not allowed")]
    NotAllowed(String),
    /// Helper exists but does not provide the requested method.
    #[error("Helper {helper} has no method {method}")]
    UnknownMethod {
        /// Helper name (e.g., "Time").
        helper: String,
        /// Requested method (e.g., "nice").
        method: String,
    },
    /// Helper rejected its arguments.
    #[error("Helper {helper} rejected its arguments: {message}")]
    InvalidArgument {
        /// Helper name.
        helper: String,
        /// Reason the arguments were rejected.
        message: String,
    },
}
