//! Default configuration values - single source of truth

/// Suffix appended to a table's canonical name to name its form type
pub const TYPE_SUFFIX: &str = "Type";

/// Output directory for form types, relative to the bundle path
pub const FORM_DIR: &str = "Form/Type";

/// Module path of the model structs referenced as `data_class`
pub const MODELS_MODULE: &str = "crate::models";

/// SQL dialect used to parse schema files
pub const PLATFORM: &str = "mysql";

/// File name suffix identifying schema sources
pub const SCHEMA_FILE_SUFFIX: &str = "schema.sql";

/// Database name for a schema file called exactly `schema.sql`
pub const DATABASE_NAME: &str = "default";
