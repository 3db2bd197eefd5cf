//! CLI error types.

use bracket_adapter::AdapterError;
use bracket_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Adapter(#[from] AdapterError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
