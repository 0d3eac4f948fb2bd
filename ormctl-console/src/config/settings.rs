//! Configuration settings for the console commands

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use ormctl::ConnectionDescriptor;
use ormctl_codegen::config::defaults as form_defaults;
use ormctl_codegen::FormGenConfig;
use serde::{Deserialize, Serialize};

use super::defaults;
use crate::error::{ConsoleError, Result};

/// Top-level `ormctl.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Application environment; `prod` makes `database:drop` ask first
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Connection used when `--connection` is absent
    #[serde(default)]
    pub default_connection: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub connections: BTreeMap<String, ConnectionConfig>,

    /// Bundle used when `form:generate` gets none
    #[serde(default)]
    pub default_bundle: Option<String>,

    #[serde(default)]
    pub bundles: BTreeMap<String, BundleConfig>,

    #[serde(default)]
    pub form: FormSettings,
}

/// `[connections.<name>]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_adapter")]
    pub adapter: String,

    /// Clause-style connection string, e.g. `mysql:host=localhost;dbname=shop`
    pub dsn: String,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// `[bundles.<name>]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Bundle root, relative to the project directory
    pub path: PathBuf,

    /// Where `*schema.sql` files live, relative to `path`
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Where form types are written, relative to `path`
    #[serde(default = "default_form_dir")]
    pub form_dir: PathBuf,
}

/// `[form]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSettings {
    #[serde(default = "default_type_suffix")]
    pub type_suffix: String,

    #[serde(default = "default_models_module")]
    pub models_module: String,

    /// SQL dialect of the schema files
    #[serde(default)]
    pub platform: Option<String>,
}

// Default value functions for serde
fn default_environment() -> String {
    defaults::ENVIRONMENT.to_string()
}
fn default_adapter() -> String {
    defaults::ADAPTER.to_string()
}
fn default_schema_dir() -> PathBuf {
    PathBuf::from(defaults::SCHEMA_DIR)
}
fn default_form_dir() -> PathBuf {
    PathBuf::from(form_defaults::FORM_DIR)
}
fn default_type_suffix() -> String {
    form_defaults::TYPE_SUFFIX.to_string()
}
fn default_models_module() -> String {
    form_defaults::MODELS_MODULE.to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            default_connection: None,
            log_level: None,
            connections: BTreeMap::new(),
            default_bundle: None,
            bundles: BTreeMap::new(),
            form: FormSettings::default(),
        }
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            type_suffix: default_type_suffix(),
            models_module: default_models_module(),
            platform: None,
        }
    }
}

impl ConnectionConfig {
    /// Descriptor for the connection called `name`
    pub fn descriptor(&self, name: &str) -> ConnectionDescriptor {
        ConnectionDescriptor {
            name: name.to_string(),
            adapter: self.adapter.clone(),
            dsn: self.dsn.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

impl BundleConfig {
    pub fn schema_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.path).join(&self.schema_dir)
    }

    pub fn form_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.path).join(&self.form_dir)
    }
}

impl ConsoleConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ConsoleConfig = toml::from_str(&content).map_err(|e| {
            ConsoleError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE).required(false));
        }

        // Override with environment variables (ORMCTL_*)
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config: ConsoleConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == defaults::PRODUCTION_ENVIRONMENT
    }

    /// Name of the connection to use: `requested`, the configured default,
    /// or the only configured connection
    pub fn connection_name<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str> {
        if let Some(name) = requested.or(self.default_connection.as_deref()) {
            return Ok(name);
        }
        let mut names = self.connections.keys();
        match (names.next(), names.next()) {
            (Some(only), None) => Ok(only.as_str()),
            _ => Err(ConsoleError::Validation(
                "No default connection configured; use --connection".into(),
            )),
        }
    }

    /// Resolve a connection to its descriptor
    pub fn connection(&self, requested: Option<&str>) -> Result<ConnectionDescriptor> {
        let name = self.connection_name(requested)?;
        self.connections
            .get(name)
            .map(|c| c.descriptor(name))
            .ok_or_else(|| ConsoleError::UnknownConnection(name.to_string()))
    }

    /// Resolve a bundle given as `Name` or `@Name`; absent, the configured
    /// default or the only configured bundle
    pub fn bundle(&self, requested: Option<&str>) -> Result<(&str, &BundleConfig)> {
        let requested = requested.map(|name| name.trim_start_matches('@'));
        if let Some(name) = requested.or(self.default_bundle.as_deref()) {
            return self
                .bundles
                .get_key_value(name)
                .map(|(name, bundle)| (name.as_str(), bundle))
                .ok_or_else(|| ConsoleError::UnknownBundle(name.to_string()));
        }

        let mut bundles = self.bundles.iter();
        match (bundles.next(), bundles.next()) {
            (Some((name, bundle)), None) => Ok((name.as_str(), bundle)),
            _ => Err(ConsoleError::Validation(
                "No bundle given and no default_bundle configured".into(),
            )),
        }
    }

    /// Form generation settings for a bundle; `platform` overrides `[form]`
    pub fn form_config(
        &self,
        bundle: &BundleConfig,
        project_dir: &Path,
        platform: Option<&str>,
    ) -> FormGenConfig {
        FormGenConfig {
            output_dir: bundle.form_path(project_dir),
            type_suffix: self.form.type_suffix.clone(),
            models_module: self.form.models_module.clone(),
            platform: platform
                .map(str::to_string)
                .or_else(|| self.form.platform.clone()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.default_connection {
            if !self.connections.contains_key(name) {
                return Err(ConsoleError::Validation(format!(
                    "default_connection `{}` is not a configured connection",
                    name
                )));
            }
        }

        for (name, connection) in &self.connections {
            if connection.dsn.trim().is_empty() {
                return Err(ConsoleError::Validation(format!(
                    "connections.{}.dsn is required",
                    name
                )));
            }
        }

        if let Some(name) = &self.default_bundle {
            if !self.bundles.contains_key(name.trim_start_matches('@')) {
                return Err(ConsoleError::Validation(format!(
                    "default_bundle `{}` is not a configured bundle",
                    name
                )));
            }
        }

        for (name, bundle) in &self.bundles {
            if bundle.path.as_os_str().is_empty() {
                return Err(ConsoleError::Validation(format!(
                    "bundles.{}.path is required",
                    name
                )));
            }
        }

        Ok(())
    }
}
