//! Main code generator orchestrator

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::FormGenConfig;
use crate::error::Result;
use crate::parser::DatabaseMetadata;

use super::form_generator::{render_form_type, RenderOptions};
use super::planner::{ArtifactPlanner, Decision, OverwritePolicy};
use super::writer::{write_artifact, ArtifactTarget, GenerationOutcome};

/// Result for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub database: String,
    pub table: String,
    pub path: PathBuf,
    pub outcome: GenerationOutcome,
}

/// Progress notifications, emitted in processing order
#[derive(Debug, Clone, Copy)]
pub enum GenerationEvent<'a> {
    /// The output directory did not exist and was created
    DirectoryCreated(&'a Path),
    Artifact(&'a ArtifactRecord),
}

/// Everything one generation run did
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub created_dirs: Vec<PathBuf>,
    pub artifacts: Vec<ArtifactRecord>,
}

impl GenerationReport {
    /// Number of files actually written
    pub fn written(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.outcome != GenerationOutcome::SkippedExists)
            .count()
    }

    /// Number of tables whose file already existed
    pub fn skipped(&self) -> usize {
        self.artifacts.len() - self.written()
    }
}

/// Plans, renders and writes form types for loaded databases
pub struct FormTypeGenerator<'a> {
    config: &'a FormGenConfig,
}

impl<'a> FormTypeGenerator<'a> {
    /// Create a new generator with the given configuration
    pub fn new(config: &'a FormGenConfig) -> Self {
        Self { config }
    }

    /// Generate form types for every in-scope table
    pub fn generate(
        &self,
        databases: &[DatabaseMetadata],
        table_filter: &[String],
        force: bool,
    ) -> Result<GenerationReport> {
        self.generate_with(databases, table_filter, force, |_| Ok(()))
    }

    /// Like [`generate`](Self::generate), reporting each step to `observer`
    /// as it happens. An error from `observer` stops the run before the next
    /// file is written.
    pub fn generate_with<F>(
        &self,
        databases: &[DatabaseMetadata],
        table_filter: &[String],
        force: bool,
        mut observer: F,
    ) -> Result<GenerationReport>
    where
        F: FnMut(GenerationEvent<'_>) -> Result<()>,
    {
        let mut report = GenerationReport::default();
        let output_dir = self.config.output_dir.as_path();

        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir)?;
            info!("Created form directory {:?}", output_dir);
            observer(GenerationEvent::DirectoryCreated(output_dir))?;
            report.created_dirs.push(output_dir.to_path_buf());
        }

        let planner = ArtifactPlanner::new(output_dir, &self.config.type_suffix);
        let options = RenderOptions {
            type_suffix: &self.config.type_suffix,
            models_module: &self.config.models_module,
        };
        let policy = OverwritePolicy::from_force(force);

        for database in databases {
            let plan = planner.plan(database, table_filter, force);
            debug!(
                "Database {}: {} of {} tables in scope",
                database.name,
                plan.len(),
                database.tables.len()
            );

            for planned in plan {
                let outcome = match planned.decision {
                    Decision::Skip => GenerationOutcome::SkippedExists,
                    Decision::Generate => write_artifact(&ArtifactTarget {
                        path: planned.path.clone(),
                        content: render_form_type(planned.table, &options),
                        policy,
                    })?,
                };

                let record = ArtifactRecord {
                    database: database.name.clone(),
                    table: planned.table.canonical_name(),
                    path: planned.path,
                    outcome,
                };
                observer(GenerationEvent::Artifact(&record))?;
                report.artifacts.push(record);
            }
        }

        info!(
            "Form generation complete: {} written, {} skipped",
            report.written(),
            report.skipped()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodegenError;
    use crate::parser::{build_database, parse_schema};
    use sqlparser::dialect::MySqlDialect;
    use std::fs;
    use std::io;

    const SCHEMA: &str = r#"
        CREATE TABLE book (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            title VARCHAR(255) NOT NULL
        );
        CREATE TABLE author (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(128) NOT NULL
        );
    "#;

    fn databases() -> Vec<DatabaseMetadata> {
        let tables = parse_schema(SCHEMA, &MySqlDialect {}).unwrap();
        vec![build_database("bookstore".into(), tables).unwrap()]
    }

    fn outcomes(report: &GenerationReport) -> Vec<GenerationOutcome> {
        report.artifacts.iter().map(|a| a.outcome).collect()
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = FormGenConfig::default_with_output(dir.path().join("Form/Type"));
        let generator = FormTypeGenerator::new(&config);
        let databases = databases();

        let first = generator.generate(&databases, &[], false).unwrap();
        assert_eq!(first.created_dirs, vec![dir.path().join("Form/Type")]);
        assert_eq!(
            outcomes(&first),
            vec![GenerationOutcome::Written, GenerationOutcome::Written]
        );

        let book = dir.path().join("Form/Type/BookType.rs");
        fs::write(&book, "// edited by hand\n").unwrap();

        let second = generator.generate(&databases, &[], false).unwrap();
        assert!(second.created_dirs.is_empty());
        assert_eq!(
            outcomes(&second),
            vec![GenerationOutcome::SkippedExists, GenerationOutcome::SkippedExists]
        );
        assert_eq!(fs::read_to_string(&book).unwrap(), "// edited by hand\n");
    }

    #[test]
    fn test_force_overwrites_every_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = FormGenConfig::default_with_output(dir.path().to_path_buf());
        let generator = FormTypeGenerator::new(&config);
        let databases = databases();

        let book = dir.path().join("BookType.rs");
        fs::write(&book, "// stale\n").unwrap();

        let report = generator.generate(&databases, &[], true).unwrap();
        assert_eq!(
            outcomes(&report),
            vec![
                GenerationOutcome::WrittenForced,
                GenerationOutcome::WrittenForced
            ]
        );
        assert!(fs::read_to_string(&book)
            .unwrap()
            .contains("pub struct BookType;"));
    }

    #[test]
    fn test_filter_writes_only_listed_tables() {
        let dir = tempfile::tempdir().unwrap();
        let config = FormGenConfig::default_with_output(dir.path().to_path_buf());
        let generator = FormTypeGenerator::new(&config);

        let report = generator
            .generate(&databases(), &["Book".to_string()], false)
            .unwrap();
        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts[0].table, "Book");
        assert!(dir.path().join("BookType.rs").exists());
        assert!(!dir.path().join("AuthorType.rs").exists());
    }

    #[test]
    fn test_observer_sees_events_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = FormGenConfig::default_with_output(dir.path().join("forms"));
        let generator = FormTypeGenerator::new(&config);

        let mut seen = Vec::new();
        generator
            .generate_with(&databases(), &[], false, |event| match event {
                GenerationEvent::DirectoryCreated(path) => {
                    seen.push(format!("dir {}", path.display()));
                    Ok(())
                }
                GenerationEvent::Artifact(record) => {
                    seen.push(record.table.clone());
                    Ok(())
                }
            })
            .unwrap();

        assert_eq!(seen.len(), 3);
        assert!(seen[0].starts_with("dir "));
        assert_eq!(&seen[1..], &["Book".to_string(), "Author".to_string()]);
    }

    #[test]
    fn test_observer_error_stops_generation() {
        let dir = tempfile::tempdir().unwrap();
        let config = FormGenConfig::default_with_output(dir.path().to_path_buf());
        let generator = FormTypeGenerator::new(&config);

        let err = generator
            .generate_with(&databases(), &[], false, |event| match event {
                GenerationEvent::Artifact(_) => Err(CodegenError::IoError(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "stdout closed",
                ))),
                GenerationEvent::DirectoryCreated(_) => Ok(()),
            })
            .unwrap_err();

        assert!(matches!(err, CodegenError::IoError(_)));
        assert!(dir.path().join("BookType.rs").exists());
        assert!(!dir.path().join("AuthorType.rs").exists());
    }
}
