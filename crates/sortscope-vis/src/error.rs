//! Error types for sortscope-vis.

use thiserror::Error;

/// Result type for visualization host operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hosting a session.
#[derive(Debug, Error)]
pub enum Error {
    /// The engine rejected the configuration or a contract was broken.
    #[error("engine error: {0}")]
    Engine(#[from] sortscope_engine::Error),

    /// Invalid host configuration
    #[error("invalid config: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The ticker task panicked
    #[error("ticker task failed: {0}")]
    Task(String),
}
