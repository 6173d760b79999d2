//! CLI error types.

use mark_config::ConfigError;
use mark_engine::EngineError;
use mark_server::ServerError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("Page not found: {0}")]
    NotFound(String),
}
