//! Common error types for lexmatch.

use std::path::PathBuf;

use lexmatch_core::MatchError;
use thiserror::Error;

/// Common error type for lexmatch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed input file
    #[error("invalid input {}: {message}", path.display())]
    Input { path: PathBuf, message: String },

    /// Matching error
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Result type alias using lexmatch Error.
pub type Result<T> = std::result::Result<T, Error>;
