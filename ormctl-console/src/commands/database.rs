//! `database:create` and `database:drop`

use std::io::Write;

use ormctl::{
    strip_database_name, Completion, LifecycleExecutor, LifecycleStatement, StrippedDescriptor,
};
use tracing::{debug, info};

use super::{CommandStatus, Console};
use crate::error::Result;

const PRODUCTION_WARNING: &str = "WARNING: you are about to drop a database in production !";
const CONFIRMATION_QUESTION: &str = "Are you sure ? (y/n) ";

impl Console<'_> {
    /// Create the database selected by a connection
    pub async fn create_database(
        &self,
        connection: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<CommandStatus> {
        let Some(stripped) = self.serverless_descriptor(connection, out)? else {
            return Ok(CommandStatus::Failure);
        };

        let statement = LifecycleStatement::CreateDatabase(stripped.database_name.clone());
        LifecycleExecutor::new(self.context)
            .run_statement(&stripped.descriptor, &statement)
            .await?;

        writeln!(out, "Database {} has been created.", stripped.database_name)?;
        Ok(CommandStatus::Success)
    }

    /// Drop the database selected by a connection.
    ///
    /// Refuses to run without `force`. In production the operator is asked
    /// first; declining ends the command before any connection is opened.
    pub async fn drop_database(
        &self,
        connection: Option<&str>,
        force: bool,
        out: &mut dyn Write,
    ) -> Result<CommandStatus> {
        if !force {
            writeln!(
                out,
                "You have to use the \"--force\" option to drop the database."
            )?;
            return Ok(CommandStatus::Failure);
        }

        let Some(stripped) = self.serverless_descriptor(connection, out)? else {
            return Ok(CommandStatus::Failure);
        };

        let statement = LifecycleStatement::DropDatabase(stripped.database_name.clone());
        let mut executor = LifecycleExecutor::new(self.context);

        if self.config.is_production() {
            writeln!(out, "{}", PRODUCTION_WARNING)?;
            out.flush()?;
            let completion = executor
                .run_confirmed(
                    &stripped.descriptor,
                    &statement,
                    self.gate,
                    CONFIRMATION_QUESTION,
                )
                .await?;
            if completion == Completion::Aborted {
                writeln!(out, "Aborted.")?;
                return Ok(CommandStatus::Aborted);
            }
        } else {
            executor
                .run_statement(&stripped.descriptor, &statement)
                .await?;
        }

        writeln!(out, "Database {} has been dropped.", stripped.database_name)?;
        Ok(CommandStatus::Success)
    }

    /// Resolve the connection and remove its database clause.
    ///
    /// `None` means the connection string names no database; the message has
    /// already been written.
    fn serverless_descriptor(
        &self,
        connection: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<Option<StrippedDescriptor>> {
        let descriptor = self.config.connection(connection)?;
        debug!(
            "Using connection {} ({} adapter)",
            descriptor.name, descriptor.adapter
        );

        match strip_database_name(&descriptor) {
            Ok(stripped) => {
                info!(
                    "Database {} on connection {}",
                    stripped.database_name, descriptor.name
                );
                Ok(Some(stripped))
            }
            Err(ormctl::Error::NoDatabaseNameFound(_)) => {
                writeln!(out, "No database name found.")?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
