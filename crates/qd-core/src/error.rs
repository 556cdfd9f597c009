//! Error types for qa-docs

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for qa-docs
#[derive(Debug, Error)]
pub enum QaDocsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// A pretrained artifact could not be read or parsed
    #[error("Failed to load model artifact '{artifact}': {message}")]
    ModelLoad { artifact: String, message: String },

    /// A pretrained artifact disagrees with another one about its dimensions
    #[error("Model shape mismatch: {0}")]
    ModelShape(String),

    /// HTML to Markdown conversion failure
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Invalid source document
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<QaDocsError>,
    },
}

impl QaDocsError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        QaDocsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for a [`QaDocsError::ModelLoad`] error
    pub fn model_load(artifact: impl Into<String>, message: impl std::fmt::Display) -> Self {
        QaDocsError::ModelLoad {
            artifact: artifact.into(),
            message: message.to_string(),
        }
    }
}

impl From<toml::de::Error> for QaDocsError {
    fn from(err: toml::de::Error) -> Self {
        QaDocsError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for QaDocsError {
    fn from(err: toml::ser::Error) -> Self {
        QaDocsError::Toml(err.to_string())
    }
}

/// Result type alias for qa-docs
pub type Result<T> = std::result::Result<T, QaDocsError>;
