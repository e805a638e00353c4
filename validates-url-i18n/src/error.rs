//! Error types for catalog operations

use thiserror::Error;

/// Errors raised while building or loading a message catalog.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Invalid locale tag
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Catalog file or directory does not exist
    #[error("Catalog not found: {0}")]
    NotFound(String),

    /// Catalog file is well-formed JSON but not a message table
    #[error("Failed to parse message file: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}
