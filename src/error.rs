//! Crate-level error type.

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the pipeline entry points
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset construction or merging failed
    #[error(transparent)]
    Data(#[from] crate::data::DataError),

    /// Configuration loading or validation failed
    #[error("Config error: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}
