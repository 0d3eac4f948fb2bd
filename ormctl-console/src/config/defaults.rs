//! Default configuration values

/// Config file name looked up by `config-rs` (extension optional)
pub const CONFIG_FILE: &str = "ormctl";

/// Prefix of environment overrides (`ORMCTL_ENVIRONMENT=prod`)
pub const ENV_PREFIX: &str = "ORMCTL";

pub const ENVIRONMENT: &str = "dev";

/// Environment in which `database:drop` asks for confirmation
pub const PRODUCTION_ENVIRONMENT: &str = "prod";

pub const ADAPTER: &str = "mysql";

/// Schema directory, relative to the bundle path
pub const SCHEMA_DIR: &str = "Resources/config";
