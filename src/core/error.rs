//! Error types for loading configuration data.

use thiserror::Error;

/// Errors that can occur when loading the fighter config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}
