//! Adapter error types.

use bracket_config::ConfigError;
use bracket_engine::EngineError;

/// Error returned by the markup adapter.
///
/// Every variant except [`AdapterError::Engine`] is a configuration error
/// raised while building the pipeline; no adapter exists afterwards.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Engine rejected a configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filter name has no built-in implementation.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// Hook name has no built-in implementation.
    #[error("Unknown hook: {0}")]
    UnknownHook(String),

    /// Helper name was not registered with the builder.
    #[error("Unknown helper: {0}")]
    UnknownHelper(String),

    /// Render or strip call failed inside the engine.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl AdapterError {
    /// Whether the error was raised while building the pipeline.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::Engine(_))
    }
}
