//! Single MySQL connections for lifecycle statements

use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder};
use tracing::debug;

use crate::dsn::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::lifecycle::{ConnectionFactory, LifecycleConnection};

/// Opens one `mysql_async::Conn` per lifecycle run.
///
/// The connection string uses the clause format
/// `mysql:host=localhost;port=3306;dbname=shop`. Recognised keys: `host`,
/// `port`, `unix_socket`, `user`, `password`, `dbname` / `Database`.
/// Credentials on the descriptor take precedence over the clauses.
///
/// # Example
///
/// ```ignore
/// use ormctl::{ConnectionDescriptor, MySqlConnectionFactory};
///
/// let descriptor = ConnectionDescriptor::new("default", "mysql", "mysql:host=127.0.0.1;port=3306")
///     .with_credentials("root", "");
/// let opts = MySqlConnectionFactory::opts(&descriptor)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnectionFactory;

impl MySqlConnectionFactory {
    /// Translate a descriptor into driver options
    pub fn opts(descriptor: &ConnectionDescriptor) -> Result<Opts> {
        let parts = descriptor.parts();

        if let Some(driver) = parts.driver {
            if !driver.eq_ignore_ascii_case("mysql") {
                return Err(Error::InvalidDsn(format!(
                    "driver `{}` is not supported by the mysql adapter",
                    driver
                )));
            }
        }

        let mut builder = OptsBuilder::default();

        if let Some(host) = parts.get("host") {
            builder = builder.ip_or_hostname(host);
        }
        if let Some(port) = parts.get("port") {
            let port: u16 = port
                .parse()
                .map_err(|_| Error::InvalidDsn(format!("invalid port `{}`", port)))?;
            builder = builder.tcp_port(port);
        }
        if let Some(socket) = parts.get("unix_socket") {
            builder = builder.socket(Some(socket));
        }

        let user = descriptor.user.as_deref().or_else(|| parts.get("user"));
        let password = descriptor
            .password
            .as_deref()
            .or_else(|| parts.get("password"));
        let db_name = parts.get("dbname").or_else(|| parts.get("Database"));

        builder = builder.user(user).pass(password).db_name(db_name);

        Ok(Opts::from(builder))
    }
}

#[async_trait]
impl ConnectionFactory for MySqlConnectionFactory {
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn LifecycleConnection>> {
        let opts = Self::opts(descriptor)?;
        debug!(
            "Connecting to {}:{} as {:?}",
            opts.ip_or_hostname(),
            opts.tcp_port(),
            opts.user()
        );

        let conn = Conn::new(opts)
            .await
            .map_err(|e| Error::ConnectionFailure(driver_message(e)))?;

        Ok(Box::new(MySqlConnection { inner: Some(conn) }))
    }
}

/// A MySQL connection owned by one lifecycle run
pub struct MySqlConnection {
    inner: Option<Conn>,
}

#[async_trait]
impl LifecycleConnection for MySqlConnection {
    async fn execute(&mut self, statement: &str) -> Result<()> {
        let conn = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::ConnectionFailure("Connection already closed".to_string()))?;

        conn.query_drop(statement)
            .await
            .map_err(|e| Error::ExecutionFailure(driver_message(e)))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.inner.take() {
            conn.disconnect()
                .await
                .map_err(|e| Error::ConnectionFailure(driver_message(e)))?;
        }
        Ok(())
    }
}

/// Keep the server's own message for server-side errors
fn driver_message(err: mysql_async::Error) -> String {
    match err {
        mysql_async::Error::Server(server) => server.message,
        other => other.to_string(),
    }
}
