//! Error types for ormctl-codegen

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for ormctl-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during schema loading and form type generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to parse SQL schema {file}: {message}")]
    ParseError { file: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Tables `{existing}` and `{table}` in database `{database}` both map to `{canonical}`")]
    DuplicateTable {
        database: String,
        existing: String,
        table: String,
        canonical: String,
    },

    #[error("No *schema.sql files found in {}", .0.display())]
    NoSchemaSourcesFound(PathBuf),
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

impl From<walkdir::Error> for CodegenError {
    fn from(err: walkdir::Error) -> Self {
        match err.into_io_error() {
            Some(io) => CodegenError::IoError(io),
            None => CodegenError::ValidationError("Symlink loop while searching schemas".into()),
        }
    }
}
