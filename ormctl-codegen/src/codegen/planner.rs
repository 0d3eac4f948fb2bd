//! Artifact planner - decides which tables get a (re)generated form type

use std::path::{Path, PathBuf};

use crate::parser::{DatabaseMetadata, TableMetadata};

use super::naming::form_type_file_name;

/// What to do with one table's artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Generate,
    Skip,
}

/// Whether an existing file may be replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    SkipIfExists,
    ForceOverwrite,
}

impl OverwritePolicy {
    pub fn from_force(force: bool) -> Self {
        if force {
            Self::ForceOverwrite
        } else {
            Self::SkipIfExists
        }
    }
}

/// A table paired with its target path and decision
#[derive(Debug, Clone)]
pub struct PlannedArtifact<'a> {
    pub table: &'a TableMetadata,
    pub path: PathBuf,
    pub decision: Decision,
}

/// Plans form type artifacts for a database.
///
/// Planning only checks whether target files exist; it never writes.
#[derive(Debug, Clone)]
pub struct ArtifactPlanner<'a> {
    output_dir: &'a Path,
    type_suffix: &'a str,
}

impl<'a> ArtifactPlanner<'a> {
    pub fn new(output_dir: &'a Path, type_suffix: &'a str) -> Self {
        Self {
            output_dir,
            type_suffix,
        }
    }

    /// Where the artifact for `table` lives
    pub fn target_path(&self, table: &TableMetadata) -> PathBuf {
        self.output_dir
            .join(form_type_file_name(&table.canonical_name(), self.type_suffix))
    }

    /// Plan every in-scope table of `database`.
    ///
    /// A table is in scope when `table_filter` is empty or lists its
    /// canonical name. Results follow the database's table order.
    pub fn plan<'t>(
        &self,
        database: &'t DatabaseMetadata,
        table_filter: &[String],
        force: bool,
    ) -> Vec<PlannedArtifact<'t>> {
        database
            .tables
            .iter()
            .filter(|table| {
                table_filter.is_empty() || table_filter.contains(&table.canonical_name())
            })
            .map(|table| {
                let path = self.target_path(table);
                let decision = if force || !path.exists() {
                    Decision::Generate
                } else {
                    Decision::Skip
                };
                PlannedArtifact {
                    table,
                    path,
                    decision,
                }
            })
            .collect()
    }
}
