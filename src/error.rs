//! Error types for the abcbook library

use std::io;

/// Library error type for abcbook operations
#[derive(Debug, thiserror::Error)]
pub enum AbcError {
    /// The tunebook text could not be decoded with any candidate encoding
    #[error("load error: {0}")]
    LoadError(String),

    /// A tune has no `X:` line to renumber
    #[error("structural integrity error: {0}")]
    StructuralIntegrityError(String),

    /// An external converter failed, was missing or timed out
    #[error("external tool error: {0}")]
    ExternalToolError(String),

    /// Converter configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for AbcError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}

impl From<tempfile::PersistError> for AbcError {
    fn from(error: tempfile::PersistError) -> Self {
        Self::IoError(error.error.to_string())
    }
}
