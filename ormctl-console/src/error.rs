//! Error types for ormctl-console

use thiserror::Error;

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Errors that abort a console command
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown connection: {0}")]
    UnknownConnection(String),

    #[error("Unknown bundle: {0}")]
    UnknownBundle(String),

    #[error(transparent)]
    Runtime(#[from] ormctl::Error),

    #[error(transparent)]
    Codegen(#[from] ormctl_codegen::CodegenError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ConsoleError {
    fn from(err: config::ConfigError) -> Self {
        ConsoleError::Config(err.to_string())
    }
}
