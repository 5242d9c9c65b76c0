//! Error types for the ambient surfaces (config, preload, collaborators).
//!
//! The writing core itself is total and never returns these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem error while reading or writing config or a preload file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config could not be serialized.
    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A global tracing subscriber was already installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// A collaborator that has no implementation behind it was called.
    #[error("{0} is not wired to an implementation")]
    Unwired(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
