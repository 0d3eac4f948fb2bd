//! Artifact writer - the only step that touches the filesystem

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;

use super::planner::OverwritePolicy;

/// A rendered artifact ready to be written
#[derive(Debug, Clone)]
pub struct ArtifactTarget {
    pub path: PathBuf,
    pub content: String,
    pub policy: OverwritePolicy,
}

/// What happened to one table's artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    Written,
    WrittenForced,
    SkippedExists,
}

/// Write an artifact.
///
/// Parent directories are created when missing. The whole content replaces
/// any existing file under [`OverwritePolicy::ForceOverwrite`]; under
/// [`OverwritePolicy::SkipIfExists`] an existing file is left untouched.
pub fn write_artifact(target: &ArtifactTarget) -> Result<GenerationOutcome> {
    if target.policy == OverwritePolicy::SkipIfExists && target.path.exists() {
        debug!("Skipping existing {:?}", target.path);
        return Ok(GenerationOutcome::SkippedExists);
    }

    if let Some(parent) = target.path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target.path, &target.content)?;
    debug!("Wrote {:?} ({} bytes)", target.path, target.content.len());

    Ok(match target.policy {
        OverwritePolicy::ForceOverwrite => GenerationOutcome::WrittenForced,
        OverwritePolicy::SkipIfExists => GenerationOutcome::Written,
    })
}
