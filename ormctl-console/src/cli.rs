//! CLI argument parsing using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Database lifecycle and form type generation
#[derive(Parser, Debug)]
#[command(name = "ormctl")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Project directory bundle paths are relative to
    /// (defaults to the config file's directory, else the current one)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a given database or the default one
    #[command(name = "database:create")]
    DatabaseCreate {
        /// Connection to use. Example: default, bookstore
        #[arg(long)]
        connection: Option<String>,
    },

    /// Drop a given database or the default one
    #[command(name = "database:drop")]
    DatabaseDrop {
        /// Connection to use. Example: default, bookstore
        #[arg(long)]
        connection: Option<String>,

        /// Set this parameter to execute this action
        #[arg(long)]
        force: bool,
    },

    /// Generate form type stubs based on the schema files
    #[command(name = "form:generate")]
    FormGenerate {
        /// The bundle to generate form types for (Ex: @BookstoreBundle)
        bundle: Option<String>,

        /// Models to generate form types for (Ex: Book Author)
        models: Vec<String>,

        /// Overwrite existing form types
        #[arg(short, long)]
        force: bool,

        /// The platform (mysql, pgsql, sqlite, ...)
        #[arg(long)]
        platform: Option<String>,
    },
}
