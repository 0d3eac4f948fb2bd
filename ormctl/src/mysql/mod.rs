//! MySQL adapter for ormctl

mod connection;

pub use connection::{MySqlConnection, MySqlConnectionFactory};
