//! Console commands
//!
//! Each command writes its user-facing lines to the given output stream and
//! returns a [`CommandStatus`]. Errors that abort a command are returned as
//! [`ConsoleError`](crate::error::ConsoleError) and reported by the caller.

mod database;
mod form;

use std::path::Path;

use ormctl::{ConfirmationGate, ExecutionContext};

use crate::config::ConsoleConfig;

pub use form::FormGenerateArgs;

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
    /// The operator declined a confirmation
    Aborted,
}

impl CommandStatus {
    /// Process exit code: `0`, `1` or `-2`
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Aborted => -2,
        }
    }
}

/// Everything one command invocation works with
pub struct Console<'a> {
    config: &'a ConsoleConfig,
    context: &'a ExecutionContext,
    gate: &'a dyn ConfirmationGate,
    project_dir: &'a Path,
}

impl<'a> Console<'a> {
    pub fn new(
        config: &'a ConsoleConfig,
        context: &'a ExecutionContext,
        gate: &'a dyn ConfirmationGate,
        project_dir: &'a Path,
    ) -> Self {
        Self {
            config,
            context,
            gate,
            project_dir,
        }
    }

    /// `path` relative to the project directory, for display
    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(self.project_dir).unwrap_or(path)
    }
}
