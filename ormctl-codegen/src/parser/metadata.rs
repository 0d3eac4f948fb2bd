//! Schema model: databases, tables and columns

use serde::{Deserialize, Serialize};

use crate::codegen::canonical_name;

/// A database loaded from one schema file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    /// Database name
    pub name: String,

    /// Tables in declaration order; names are unique
    pub tables: Vec<TableMetadata>,
}

/// Metadata for a database table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name as written in the schema
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<ColumnMetadata>,

    /// Foreign key constraints
    pub foreign_keys: Vec<ForeignKeyMetadata>,

    /// Primary key (if any)
    pub primary_key: Option<PrimaryKey>,
}

/// Metadata for a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,

    /// Data type as string (e.g., "BIGINT", "VARCHAR(255)")
    pub data_type: String,

    /// Whether the column is nullable
    pub nullable: bool,

    /// Default value expression (if any)
    pub default_value: Option<String>,

    /// Whether this column is auto-increment
    pub is_auto_increment: bool,

    /// Enum values if this is an ENUM column
    pub enum_values: Option<Vec<String>>,

    /// Column comment (if any)
    pub comment: Option<String>,
}

/// Primary key definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryKey {
    /// Columns in the primary key (in order)
    pub columns: Vec<String>,
}

/// Foreign key constraint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeyMetadata {
    /// Column name in this table
    pub column_name: String,

    /// Referenced table name
    pub referenced_table: String,

    /// Referenced column name
    pub referenced_column: String,
}

impl DatabaseMetadata {
    /// Get a table by its canonical name
    pub fn get_table(&self, canonical: &str) -> Option<&TableMetadata> {
        self.tables.iter().find(|t| t.canonical_name() == canonical)
    }
}

impl TableMetadata {
    /// Code-safe identifier of the table (`book_author` -> `BookAuthor`)
    pub fn canonical_name(&self) -> String {
        canonical_name(&self.name)
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check if a column is part of the primary key
    pub fn is_primary_key_column(&self, column_name: &str) -> bool {
        self.primary_key
            .as_ref()
            .map(|pk| pk.columns.iter().any(|c| c == column_name))
            .unwrap_or(false)
    }

    /// The foreign key starting at a column, if any
    pub fn foreign_key_for(&self, column_name: &str) -> Option<&ForeignKeyMetadata> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.column_name == column_name)
    }
}

impl ColumnMetadata {
    /// Check if this column has an enum type
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }

    /// NOT NULL without a default: a value must be supplied
    pub fn is_required(&self) -> bool {
        !self.nullable && self.default_value.is_none() && !self.is_auto_increment
    }
}
