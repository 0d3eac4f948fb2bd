//! CLI entry point for ormctl

mod cli;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use ormctl::ExecutionContext;
use ormctl_console::{CommandStatus, Console, ConsoleConfig, FormGenerateArgs, StdinConfirmation};

/// Unexpected errors (configuration, I/O, driver).
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        // -2 is reported as 254, the way the shell sees exit(-2)
        Ok(status) => ExitCode::from(status.code() as u8),
        Err(e) => {
            eprintln!("ormctl: error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<CommandStatus> {
    // Load configuration first (before logging, so we can use config.log_level)
    let config = match &cli.config {
        Some(path) => ConsoleConfig::from_file(path)?,
        None => ConsoleConfig::load(None)?,
    };

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    config.validate()?;

    let project_dir = project_dir(&cli)?;
    debug!("Project directory: {:?}", project_dir);

    let context = ExecutionContext::new();
    let gate = StdinConfirmation;
    let console = Console::new(&config, &context, &gate, &project_dir);
    let mut out = io::stdout();

    let status = match cli.command {
        Commands::DatabaseCreate { connection } => runtime()?
            .block_on(console.create_database(connection.as_deref(), &mut out))?,
        Commands::DatabaseDrop { connection, force } => runtime()?
            .block_on(console.drop_database(connection.as_deref(), force, &mut out))?,
        Commands::FormGenerate {
            bundle,
            models,
            force,
            platform,
        } => console.generate_forms(
            &FormGenerateArgs {
                bundle: bundle.as_deref(),
                models: &models,
                force,
                platform: platform.as_deref(),
            },
            &mut out,
        )?,
    };

    Ok(status)
}

fn project_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.project_dir {
        return Ok(dir.clone());
    }
    if let Some(parent) = cli.config.as_deref().and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            return Ok(parent.to_path_buf());
        }
    }
    std::env::current_dir().context("Failed to read the current directory")
}

/// Driver calls run on a single thread; nothing is concurrent
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")
}
