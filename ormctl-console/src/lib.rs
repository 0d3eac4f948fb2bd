//! ormctl-console: console commands for database lifecycle and form types
//!
//! Three commands, each usable from the `ormctl` binary or programmatically
//! through [`Console`]:
//!
//! - `database:create` creates the database named by a connection
//! - `database:drop --force` drops it, asking first in production
//! - `form:generate [bundle] [models...]` writes form type stubs from the
//!   bundle's `*schema.sql` files
//!
//! # Configuration
//!
//! ```toml
//! environment = "dev"
//! default_connection = "default"
//!
//! [connections.default]
//! adapter = "mysql"
//! dsn = "mysql:host=localhost;dbname=bookstore"
//! user = "root"
//!
//! [bundles.BookstoreBundle]
//! path = "src/BookstoreBundle"
//! ```

pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;

pub use commands::{CommandStatus, Console, FormGenerateArgs};
pub use config::ConsoleConfig;
pub use confirm::StdinConfirmation;
pub use error::{ConsoleError, Result};
