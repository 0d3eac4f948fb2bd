//! Error types for ormctl

use thiserror::Error;

/// Result type alias for ormctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving descriptors or running lifecycle statements
#[derive(Error, Debug)]
pub enum Error {
    /// The connection string has no `dbname=` / `Database=` clause
    #[error("No database name found in connection string: {0}")]
    NoDatabaseNameFound(String),

    /// The connection string could not be interpreted by the adapter
    #[error("Invalid connection string: {0}")]
    InvalidDsn(String),

    /// No connection factory is registered for the adapter
    #[error("Unknown adapter: {0}")]
    UnknownAdapter(String),

    /// Opening the connection failed
    #[error("Connection error: {0}")]
    ConnectionFailure(String),

    /// The server rejected the statement
    #[error("Execution error: {0}")]
    ExecutionFailure(String),
}
