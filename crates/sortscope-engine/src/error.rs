//! Error types for sortscope-engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the sorting engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A caller broke an engine contract (e.g. advancing a finished generator).
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// The session or sequence was configured with invalid parameters.
    #[error("configuration error: {0}")]
    Configuration(String),
}
