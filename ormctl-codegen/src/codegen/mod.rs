//! Code generation module

mod code_generator;
mod field_resolver;
mod form_generator;
mod naming;
pub mod planner;
pub mod writer;

pub use code_generator::*;
pub use field_resolver::*;
pub use form_generator::*;
pub use naming::*;
pub use planner::{ArtifactPlanner, Decision, OverwritePolicy, PlannedArtifact};
pub use writer::{write_artifact, ArtifactTarget, GenerationOutcome};
