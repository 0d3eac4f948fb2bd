//! ormctl - database lifecycle and form runtime for the ormctl console
//!
//! This crate holds the runtime half of the `ormctl` workspace:
//!
//! - **Connection descriptors**: named connections with an adapter and a
//!   clause-style connection string (`mysql:host=localhost;dbname=shop`)
//! - **Serverless descriptors**: [`strip_database_name`] removes the
//!   database clause so `CREATE DATABASE` can run before the database exists
//! - **Lifecycle execution**: [`LifecycleExecutor`] opens one connection,
//!   runs one statement and closes it, using the adapters registered in an
//!   explicit [`ExecutionContext`]
//! - **Form runtime**: the [`form::FormType`] trait implemented by generated
//!   form types
//!
//! # Example
//!
//! ```ignore
//! use ormctl::{
//!     strip_database_name, ConnectionDescriptor, ExecutionContext, LifecycleExecutor,
//!     LifecycleStatement,
//! };
//!
//! async fn create(descriptor: &ConnectionDescriptor) -> ormctl::Result<()> {
//!     let stripped = strip_database_name(descriptor)?;
//!     let context = ExecutionContext::new();
//!     LifecycleExecutor::new(&context)
//!         .run_statement(
//!             &stripped.descriptor,
//!             &LifecycleStatement::CreateDatabase(stripped.database_name),
//!         )
//!         .await
//! }
//! ```

pub mod context;
pub mod dsn;
pub mod error;
pub mod form;
pub mod lifecycle;
pub mod mysql;

pub use context::{AdapterRegistry, ExecutionContext};
pub use dsn::{strip_database_name, ConnectionDescriptor, DsnParts, StrippedDescriptor};
pub use error::{Error, Result};
pub use lifecycle::{
    Completion, ConfirmationGate, ConnectionFactory, LifecycleConnection, LifecycleExecutor,
    LifecycleState, LifecycleStatement,
};
pub use mysql::{MySqlConnection, MySqlConnectionFactory};
