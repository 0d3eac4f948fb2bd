//! ormctl-codegen: Generate form type stubs from SQL schema DDL
//!
//! Schema files are parsed with `sqlparser-rs`; every table becomes one
//! `<Table>Type.rs` file implementing `ormctl::form::FormType`. Existing
//! files are left alone unless generation is forced, so generated stubs can
//! be edited by hand.
//!
//! # Usage in build.rs
//!
//! ```rust,ignore
//! fn main() {
//!     let out_dir = std::env::var("OUT_DIR").unwrap();
//!     ormctl_codegen::FormGenBuilder::new("schema/bookstore.schema.sql")
//!         .output_dir(&out_dir)
//!         .force()
//!         .generate()
//!         .expect("Failed to generate form types");
//!
//!     println!("cargo:rerun-if-changed=schema/bookstore.schema.sql");
//! }
//! ```
//!
//! Include a generated file where the model structs are in scope:
//!
//! ```rust,ignore
//! mod forms {
//!     include!(concat!(env!("OUT_DIR"), "/BookType.rs"));
//! }
//! ```
//!
//! # Console usage
//!
//! ```bash
//! ormctl form:generate @BookstoreBundle Book Author --force
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;

use std::path::{Path, PathBuf};

use tracing::info;

pub use crate::codegen::{
    ArtifactRecord, FormTypeGenerator, GenerationEvent, GenerationOutcome, GenerationReport,
};
pub use crate::config::FormGenConfig;
pub use crate::error::{CodegenError, Result};

/// Load every `*schema.sql` file under `schema_dir` and generate form types.
///
/// Fails with [`CodegenError::NoSchemaSourcesFound`] when the directory holds
/// no schema file.
pub fn generate_from_dir(
    config: &FormGenConfig,
    schema_dir: &Path,
    table_filter: &[String],
    force: bool,
) -> Result<GenerationReport> {
    generate_from_dir_with(config, schema_dir, table_filter, force, |_| Ok(()))
}

/// Like [`generate_from_dir`], reporting progress to `observer`
pub fn generate_from_dir_with<F>(
    config: &FormGenConfig,
    schema_dir: &Path,
    table_filter: &[String],
    force: bool,
    observer: F,
) -> Result<GenerationReport>
where
    F: FnMut(GenerationEvent<'_>) -> Result<()>,
{
    config.validate()?;

    let files = parser::find_schema_files(schema_dir)?;
    if files.is_empty() {
        return Err(CodegenError::NoSchemaSourcesFound(schema_dir.to_path_buf()));
    }

    generate_from_files(config, &files, table_filter, force, observer)
}

fn generate_from_files<F>(
    config: &FormGenConfig,
    files: &[PathBuf],
    table_filter: &[String],
    force: bool,
    observer: F,
) -> Result<GenerationReport>
where
    F: FnMut(GenerationEvent<'_>) -> Result<()>,
{
    info!("Parsing {} schema file(s) as {}", files.len(), config.platform());
    let databases = parser::load_schemas(files, config.platform())?;
    info!(
        "Found {} tables",
        databases.iter().map(|d| d.tables.len()).sum::<usize>()
    );

    FormTypeGenerator::new(config).generate_with(&databases, table_filter, force, observer)
}

/// Builder pattern for easy configuration in build.rs
pub struct FormGenBuilder {
    schema_file: PathBuf,
    config: FormGenConfig,
    tables: Vec<String>,
    force: bool,
}

impl FormGenBuilder {
    /// Create a new builder with the given schema file
    pub fn new(schema_file: impl AsRef<Path>) -> Self {
        Self {
            schema_file: schema_file.as_ref().to_path_buf(),
            config: FormGenConfig::default(),
            tables: Vec::new(),
            force: false,
        }
    }

    /// Replace the settings with those read from a config file
    ///
    /// Builder calls made afterwards still override the loaded values.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config = FormGenConfig::load(Some(path.as_ref()))?;
        Ok(self)
    }

    /// Set the directory receiving the form type files
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Only generate these tables (canonical names, e.g. `BookAuthor`)
    pub fn tables(mut self, tables: &[&str]) -> Self {
        self.tables = tables.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set the suffix appended to the table name
    pub fn type_suffix(mut self, suffix: &str) -> Self {
        self.config.type_suffix = suffix.to_string();
        self
    }

    /// Set the module path of the model structs
    pub fn models_module(mut self, module: &str) -> Self {
        self.config.models_module = module.to_string();
        self
    }

    /// Set the SQL dialect of the schema file
    pub fn platform(mut self, platform: &str) -> Self {
        self.config.platform = Some(platform.to_string());
        self
    }

    /// Overwrite existing files
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    /// Generate the form types
    pub fn generate(self) -> Result<GenerationReport> {
        self.config.validate()?;
        if !self.schema_file.is_file() {
            return Err(CodegenError::NoSchemaSourcesFound(self.schema_file));
        }
        generate_from_files(
            &self.config,
            std::slice::from_ref(&self.schema_file),
            &self.tables,
            self.force,
            |_| Ok(()),
        )
    }
}
