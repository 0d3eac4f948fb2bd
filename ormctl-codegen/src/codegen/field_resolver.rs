//! Column type to form field kind mapping

use super::naming::{canonical_name, clean_enum_value, string_literal};
use crate::parser::{ColumnMetadata, TableMetadata};

/// Form field kind for code generation
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Textarea,
    Integer,
    Number,
    Checkbox,
    Date,
    DateTime,
    Time,
    /// ENUM column with its values
    Choice(Vec<String>),
    /// Foreign key to the model with this canonical name
    Model(String),
    File,
}

impl FieldKind {
    /// The `ormctl::form::FieldKind` expression for this kind
    pub fn to_code_string(&self) -> String {
        match self {
            FieldKind::Text => "FieldKind::Text".to_string(),
            FieldKind::Textarea => "FieldKind::Textarea".to_string(),
            FieldKind::Integer => "FieldKind::Integer".to_string(),
            FieldKind::Number => "FieldKind::Number".to_string(),
            FieldKind::Checkbox => "FieldKind::Checkbox".to_string(),
            FieldKind::Date => "FieldKind::Date".to_string(),
            FieldKind::DateTime => "FieldKind::DateTime".to_string(),
            FieldKind::Time => "FieldKind::Time".to_string(),
            FieldKind::Choice(values) => {
                let values: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
                format!("FieldKind::Choice(&[{}])", values.join(", "))
            }
            FieldKind::Model(model) => format!("FieldKind::Model({})", string_literal(model)),
            FieldKind::File => "FieldKind::File".to_string(),
        }
    }
}

/// Resolve column types to form field kinds
pub struct FieldResolver;

impl FieldResolver {
    /// Get the field kind for a column of `table`
    pub fn resolve(column: &ColumnMetadata, table: &TableMetadata) -> FieldKind {
        if let Some(fk) = table.foreign_key_for(&column.name) {
            return FieldKind::Model(canonical_name(&fk.referenced_table));
        }

        if let Some(values) = &column.enum_values {
            return FieldKind::Choice(
                values
                    .iter()
                    .map(|v| clean_enum_value(v).to_string())
                    .collect(),
            );
        }

        Self::resolve_data_type(&column.data_type)
    }

    fn resolve_data_type(data_type: &str) -> FieldKind {
        let data_type_lower = data_type.to_lowercase();

        if Self::is_boolean_type(&data_type_lower) {
            return FieldKind::Checkbox;
        }

        // Integer types
        if data_type_lower.starts_with("tinyint")
            || data_type_lower.starts_with("smallint")
            || data_type_lower.starts_with("mediumint")
            || data_type_lower.starts_with("int")
            || data_type_lower.starts_with("bigint")
            || data_type_lower.contains("serial")
        {
            return FieldKind::Integer;
        }

        // Float / decimal types
        if data_type_lower.starts_with("float")
            || data_type_lower.starts_with("double")
            || data_type_lower.starts_with("real")
            || data_type_lower.starts_with("decimal")
            || data_type_lower.starts_with("numeric")
        {
            return FieldKind::Number;
        }

        // Long text and JSON documents
        if data_type_lower.contains("text") || data_type_lower == "json" {
            return FieldKind::Textarea;
        }

        // Binary types
        if data_type_lower.starts_with("binary")
            || data_type_lower.starts_with("varbinary")
            || data_type_lower.contains("blob")
            || data_type_lower.starts_with("bytea")
        {
            return FieldKind::File;
        }

        // Date/time types
        if data_type_lower == "date" {
            return FieldKind::Date;
        }
        if data_type_lower.starts_with("datetime") || data_type_lower.starts_with("timestamp") {
            return FieldKind::DateTime;
        }
        if data_type_lower.starts_with("time") {
            return FieldKind::Time;
        }

        // CHAR, VARCHAR and anything unrecognised
        FieldKind::Text
    }

    /// BOOL, BOOLEAN, TINYINT(1) and BIT(1)
    fn is_boolean_type(data_type_lower: &str) -> bool {
        data_type_lower == "bool"
            || data_type_lower == "boolean"
            || (data_type_lower.starts_with("tinyint") && data_type_lower.contains("(1)"))
            || (data_type_lower.starts_with("bit") && data_type_lower.contains("(1)"))
    }
}
