//! Configuration settings for form type generation

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{CodegenError, Result};
use crate::parser::resolve_dialect;

/// Settings shared by every form type generated in one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormGenConfig {
    /// Directory receiving `<Model><Suffix>.rs` files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Suffix appended to the canonical table name
    #[serde(default = "default_type_suffix")]
    pub type_suffix: String,

    /// Module path of the model structs used as `data_class`
    #[serde(default = "default_models_module")]
    pub models_module: String,

    /// SQL dialect of the schema files (mysql, postgresql, sqlite, ...)
    #[serde(default)]
    pub platform: Option<String>,
}

// Default value functions for serde
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::FORM_DIR)
}
fn default_type_suffix() -> String {
    defaults::TYPE_SUFFIX.to_string()
}
fn default_models_module() -> String {
    defaults::MODELS_MODULE.to_string()
}

impl Default for FormGenConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            type_suffix: default_type_suffix(),
            models_module: default_models_module(),
            platform: None,
        }
    }
}

impl FormGenConfig {
    /// Create a default config writing into `output_dir`
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Default::default()
        }
    }

    /// Load configuration from a file, overridden by `ORMCTL_FORM__*` variables
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name("ormctl-codegen").required(false));
        }

        // Override with environment variables (ORMCTL_FORM__*)
        builder = builder.add_source(Environment::with_prefix("ORMCTL_FORM").separator("__"));

        let config: FormGenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// The platform to parse schemas with
    pub fn platform(&self) -> &str {
        self.platform.as_deref().unwrap_or(defaults::PLATFORM)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "output_dir is required".into(),
            ));
        }

        if self.type_suffix.is_empty()
            || !self
                .type_suffix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(CodegenError::ValidationError(format!(
                "type_suffix must be a non-empty identifier, got `{}`",
                self.type_suffix
            )));
        }

        if self.models_module.trim().is_empty() {
            return Err(CodegenError::ValidationError(
                "models_module is required".into(),
            ));
        }

        resolve_dialect(self.platform())?;

        Ok(())
    }
}
