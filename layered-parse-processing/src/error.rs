//! Error types for the processing facade.

use thiserror::Error;

/// Errors raised synchronously by the facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    /// Bad caller input: absent text, foreign document type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A query or annotation arrived before any document was initialized.
    #[error("no document: initialize from text or from a document first")]
    NoDocument,
}

/// Errors loading a [`ProcessingConfig`](crate::ProcessingConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for facade operations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;
