//! `form:generate`

use std::io::{self, Write};

use ormctl_codegen::{generate_from_dir_with, CodegenError, GenerationEvent, GenerationOutcome};
use tracing::debug;

use super::{CommandStatus, Console};
use crate::error::Result;

/// Arguments of `form:generate`
#[derive(Debug, Clone, Default)]
pub struct FormGenerateArgs<'a> {
    /// Bundle name, with or without a leading `@`
    pub bundle: Option<&'a str>,

    /// Canonical table names to generate; empty means all
    pub models: &'a [String],

    pub force: bool,

    /// Overrides the configured platform
    pub platform: Option<&'a str>,
}

impl Console<'_> {
    /// Generate form types for the tables of a bundle's schema files
    pub fn generate_forms(
        &self,
        args: &FormGenerateArgs<'_>,
        out: &mut dyn Write,
    ) -> Result<CommandStatus> {
        let (bundle_name, bundle) = self.config.bundle(args.bundle)?;
        let form_config = self
            .config
            .form_config(bundle, self.project_dir, args.platform);
        let schema_dir = bundle.schema_path(self.project_dir);
        debug!(
            "Generating forms for bundle {} from {:?} into {:?}",
            bundle_name, schema_dir, form_config.output_dir
        );

        let result = generate_from_dir_with(
            &form_config,
            &schema_dir,
            args.models,
            args.force,
            |event| self.report(event, out).map_err(CodegenError::from),
        );

        match result {
            Ok(_) => {}
            Err(CodegenError::NoSchemaSourcesFound(_)) => {
                writeln!(
                    out,
                    "No *schema.sql files found in bundle {}.",
                    bundle_name
                )?;
                return Ok(CommandStatus::Failure);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(CommandStatus::Success)
    }

    fn report(&self, event: GenerationEvent<'_>, out: &mut dyn Write) -> io::Result<()> {
        match event {
            GenerationEvent::DirectoryCreated(dir) => {
                writeln!(out, "+ {}/", self.relative(dir).display())
            }
            GenerationEvent::Artifact(record) => {
                let path = self.relative(&record.path).display();
                match record.outcome {
                    GenerationOutcome::Written => writeln!(out, "+ {}", path),
                    GenerationOutcome::WrittenForced => writeln!(out, "+ {} (forced)", path),
                    GenerationOutcome::SkippedExists => writeln!(
                        out,
                        "File {} exists, skipped. Try the --force option.",
                        path
                    ),
                }
            }
        }
    }
}
