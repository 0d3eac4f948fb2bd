//! Lifecycle statements: one connection, one statement, then close
//!
//! `CREATE DATABASE` / `DROP DATABASE` run against a descriptor that no longer
//! selects the target database (see [`crate::dsn::strip_database_name`]).
//! Each run opens a fresh connection through the adapter's
//! [`ConnectionFactory`]; there is no pooling and no retry.

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::context::ExecutionContext;
use crate::dsn::ConnectionDescriptor;
use crate::error::Result;

/// Opens lifecycle connections for one adapter
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    /// Open a single, non-pooled connection
    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<Box<dyn LifecycleConnection>>;
}

/// A connection able to execute one statement
#[async_trait]
pub trait LifecycleConnection: Send {
    /// Execute a statement without reading results
    async fn execute(&mut self, statement: &str) -> Result<()>;

    /// Close the connection. Closing twice is a no-op.
    async fn close(&mut self) -> Result<()>;
}

/// Asks the operator before a destructive statement runs
pub trait ConfirmationGate {
    /// Return `true` to proceed
    fn confirm(&self, question: &str) -> bool;
}

/// The statements a lifecycle command can run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleStatement {
    CreateDatabase(String),
    DropDatabase(String),
}

impl LifecycleStatement {
    /// The database the statement targets
    pub fn database_name(&self) -> &str {
        match self {
            Self::CreateDatabase(name) | Self::DropDatabase(name) => name,
        }
    }

    /// SQL text sent to the server
    pub fn sql(&self) -> String {
        match self {
            Self::CreateDatabase(name) => format!("CREATE DATABASE {};", name),
            Self::DropDatabase(name) => format!("DROP DATABASE {};", name),
        }
    }
}

impl fmt::Display for LifecycleStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}

/// Where a lifecycle run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Confirming,
    Connecting,
    Executing,
    Closed { success: bool },
    Aborted,
}

/// How a confirmed run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The statement ran
    Executed,
    /// The operator declined; nothing was opened
    Aborted,
}

/// Runs lifecycle statements with the adapters of an [`ExecutionContext`]
pub struct LifecycleExecutor<'ctx> {
    context: &'ctx ExecutionContext,
    state: LifecycleState,
}

impl<'ctx> LifecycleExecutor<'ctx> {
    /// Create an executor bound to a context
    pub fn new(context: &'ctx ExecutionContext) -> Self {
        Self {
            context,
            state: LifecycleState::Idle,
        }
    }

    /// State reached by the last run
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Open one connection, execute `statement`, close the connection.
    ///
    /// The connection is closed whether the statement succeeds or not. Errors
    /// opening the connection surface as `ConnectionFailure`, errors from the
    /// server as `ExecutionFailure`.
    pub async fn run_statement(
        &mut self,
        descriptor: &ConnectionDescriptor,
        statement: &LifecycleStatement,
    ) -> Result<()> {
        self.state = LifecycleState::Idle;
        let result = self.connect_and_execute(descriptor, statement).await;
        self.transition(LifecycleState::Closed {
            success: result.is_ok(),
        });
        result
    }

    /// Like [`run_statement`](Self::run_statement), but asks `gate` first.
    ///
    /// A declined confirmation ends the run in [`LifecycleState::Aborted`]
    /// without connecting.
    pub async fn run_confirmed(
        &mut self,
        descriptor: &ConnectionDescriptor,
        statement: &LifecycleStatement,
        gate: &dyn ConfirmationGate,
        question: &str,
    ) -> Result<Completion> {
        self.state = LifecycleState::Idle;
        self.transition(LifecycleState::Confirming);
        if !gate.confirm(question) {
            info!("Operator declined `{}`", statement);
            self.transition(LifecycleState::Aborted);
            return Ok(Completion::Aborted);
        }

        self.run_statement(descriptor, statement).await?;
        Ok(Completion::Executed)
    }

    async fn connect_and_execute(
        &mut self,
        descriptor: &ConnectionDescriptor,
        statement: &LifecycleStatement,
    ) -> Result<()> {
        let factory = self.context.connection_factory(&descriptor.adapter)?;

        self.transition(LifecycleState::Connecting);
        let mut connection = factory.connect(descriptor).await?;

        self.transition(LifecycleState::Executing);
        let sql = statement.sql();
        info!("Executing `{}` on connection {}", sql, descriptor.name);
        let result = connection.execute(&sql).await;

        if let Err(e) = connection.close().await {
            warn!("Failed to close connection {}: {}", descriptor.name, e);
        }

        result
    }

    fn transition(&mut self, next: LifecycleState) {
        debug!("Lifecycle {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn push(&self, event: impl Into<String>) {
            self.events.lock().unwrap().push(event.into());
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    struct FakeFactory {
        recorder: Arc<Recorder>,
        refuse_connect: bool,
        reject_statement: bool,
    }

    struct FakeConnection {
        recorder: Arc<Recorder>,
        reject_statement: bool,
    }

    #[async_trait]
    impl ConnectionFactory for FakeFactory {
        async fn connect(
            &self,
            descriptor: &ConnectionDescriptor,
        ) -> Result<Box<dyn LifecycleConnection>> {
            self.recorder.push(format!("connect {}", descriptor.dsn));
            if self.refuse_connect {
                return Err(Error::ConnectionFailure("connection refused".into()));
            }
            Ok(Box::new(FakeConnection {
                recorder: self.recorder.clone(),
                reject_statement: self.reject_statement,
            }))
        }
    }

    #[async_trait]
    impl LifecycleConnection for FakeConnection {
        async fn execute(&mut self, statement: &str) -> Result<()> {
            self.recorder.push(format!("execute {}", statement));
            if self.reject_statement {
                return Err(Error::ExecutionFailure(
                    "Can't create database 'shop'; database exists".into(),
                ));
            }
            Ok(())
        }

        async fn close(&mut self) -> Result<()> {
            self.recorder.push("close");
            Ok(())
        }
    }

    struct Answer(bool);

    impl ConfirmationGate for Answer {
        fn confirm(&self, _question: &str) -> bool {
            self.0
        }
    }

    fn context(recorder: &Arc<Recorder>, refuse: bool, reject: bool) -> ExecutionContext {
        let mut context = ExecutionContext::empty();
        context.register_adapter(
            "mysql",
            Arc::new(FakeFactory {
                recorder: recorder.clone(),
                refuse_connect: refuse,
                reject_statement: reject,
            }),
        );
        context
    }

    fn descriptor() -> ConnectionDescriptor {
        ConnectionDescriptor::new("default", "mysql", "host=localhost;charset=utf8")
    }

    #[test]
    fn test_statement_sql() {
        let create = LifecycleStatement::CreateDatabase("shop".into());
        assert_eq!(create.sql(), "CREATE DATABASE shop;");
        assert_eq!(create.database_name(), "shop");

        let drop = LifecycleStatement::DropDatabase("shop".into());
        assert_eq!(drop.to_string(), "DROP DATABASE shop;");
    }

    #[tokio::test]
    async fn test_run_statement_opens_executes_closes() {
        let recorder = Arc::new(Recorder::default());
        let context = context(&recorder, false, false);
        let mut executor = LifecycleExecutor::new(&context);

        executor
            .run_statement(
                &descriptor(),
                &LifecycleStatement::CreateDatabase("shop".into()),
            )
            .await
            .unwrap();

        assert_eq!(
            recorder.events(),
            vec![
                "connect host=localhost;charset=utf8",
                "execute CREATE DATABASE shop;",
                "close",
            ]
        );
        assert_eq!(executor.state(), LifecycleState::Closed { success: true });
    }

    #[tokio::test]
    async fn test_rejected_statement_still_closes() {
        let recorder = Arc::new(Recorder::default());
        let context = context(&recorder, false, true);
        let mut executor = LifecycleExecutor::new(&context);

        let err = executor
            .run_statement(
                &descriptor(),
                &LifecycleStatement::CreateDatabase("shop".into()),
            )
            .await
            .unwrap_err();

        match err {
            Error::ExecutionFailure(message) => assert!(message.contains("database exists")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(recorder.events().last().map(String::as_str), Some("close"));
        assert_eq!(executor.state(), LifecycleState::Closed { success: false });
    }

    #[tokio::test]
    async fn test_connection_failure_propagates() {
        let recorder = Arc::new(Recorder::default());
        let context = context(&recorder, true, false);
        let mut executor = LifecycleExecutor::new(&context);

        let err = executor
            .run_statement(
                &descriptor(),
                &LifecycleStatement::DropDatabase("shop".into()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ConnectionFailure(_)));
        assert_eq!(recorder.events().len(), 1);
        assert_eq!(executor.state(), LifecycleState::Closed { success: false });
    }

    #[tokio::test]
    async fn test_unknown_adapter() {
        let recorder = Arc::new(Recorder::default());
        let context = context(&recorder, false, false);
        let mut executor = LifecycleExecutor::new(&context);
        let descriptor = ConnectionDescriptor::new("legacy", "oracle", "dbname=shop");

        let err = executor
            .run_statement(
                &descriptor,
                &LifecycleStatement::CreateDatabase("shop".into()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnknownAdapter(_)));
        assert!(recorder.events().is_empty());
    }

    #[tokio::test]
    async fn test_declined_confirmation_never_connects() {
        let recorder = Arc::new(Recorder::default());
        let context = context(&recorder, false, false);
        let mut executor = LifecycleExecutor::new(&context);

        let completion = executor
            .run_confirmed(
                &descriptor(),
                &LifecycleStatement::DropDatabase("shop".into()),
                &Answer(false),
                "Are you sure?",
            )
            .await
            .unwrap();

        assert_eq!(completion, Completion::Aborted);
        assert_eq!(executor.state(), LifecycleState::Aborted);
        assert!(recorder.events().is_empty());
    }

    #[tokio::test]
    async fn test_accepted_confirmation_runs() {
        let recorder = Arc::new(Recorder::default());
        let context = context(&recorder, false, false);
        let mut executor = LifecycleExecutor::new(&context);

        let completion = executor
            .run_confirmed(
                &descriptor(),
                &LifecycleStatement::DropDatabase("shop".into()),
                &Answer(true),
                "Are you sure?",
            )
            .await
            .unwrap();

        assert_eq!(completion, Completion::Executed);
        assert_eq!(recorder.events().len(), 3);
    }
}
