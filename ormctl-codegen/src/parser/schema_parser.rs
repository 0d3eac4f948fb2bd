//! SQL schema parser using sqlparser-rs

use sqlparser::ast::{
    ColumnOption, DataType, EnumMember, Expr, ForeignKeyConstraint, Ident, IndexColumn,
    ObjectName, PrimaryKeyConstraint, Statement, TableConstraint,
};
use sqlparser::dialect::{dialect_from_str, Dialect};
use sqlparser::parser::Parser;

use super::metadata::*;
use crate::error::{CodegenError, Result};

/// Resolve a platform name to a SQL dialect.
///
/// Accepts dialect names (`mysql`, `postgresql`, `sqlite`, `generic`, ...),
/// the short forms `pgsql` / `sqlsrv`, and platform class names such as
/// `MysqlPlatform`.
pub fn resolve_dialect(platform: &str) -> Result<Box<dyn Dialect>> {
    let lowered = platform.trim().to_ascii_lowercase();
    let name = lowered.strip_suffix("platform").unwrap_or(&lowered);
    let name = match name {
        "pgsql" => "postgresql",
        "sqlsrv" => "mssql",
        other => other,
    };

    dialect_from_str(name).ok_or_else(|| CodegenError::UnknownPlatform(platform.to_string()))
}

/// Parse a SQL schema string into table metadata
pub fn parse_schema(sql: &str, dialect: &dyn Dialect) -> Result<Vec<TableMetadata>> {
    parse_named_schema("<input>", sql, dialect)
}

/// Parse a SQL schema, naming `source` in parse errors
pub fn parse_named_schema(
    source: &str,
    sql: &str,
    dialect: &dyn Dialect,
) -> Result<Vec<TableMetadata>> {
    let statements = Parser::parse_sql(dialect, sql).map_err(|e| CodegenError::ParseError {
        file: source.to_string(),
        message: e.to_string(),
    })?;

    let mut tables = Vec::new();

    for stmt in statements {
        if let Statement::CreateTable(create_table) = stmt {
            tables.push(extract_table_metadata(&create_table));
        }
    }

    Ok(tables)
}

/// Extract table metadata from a CREATE TABLE statement
fn extract_table_metadata(create: &sqlparser::ast::CreateTable) -> TableMetadata {
    let name = extract_table_name(&create.name);

    let mut columns = Vec::new();
    let mut foreign_keys = Vec::new();
    let mut primary_key = None;

    for col_def in &create.columns {
        let (column, col_pk) = extract_column_metadata(col_def);

        if col_pk {
            primary_key = Some(PrimaryKey {
                columns: vec![column.name.clone()],
            });
        }

        columns.push(column);
    }

    for constraint in &create.constraints {
        match constraint {
            TableConstraint::PrimaryKey(PrimaryKeyConstraint {
                columns: pk_cols, ..
            }) => {
                let pk_names: Vec<String> = pk_cols
                    .iter()
                    .map(extract_ident_from_index_column)
                    .collect();
                // PK columns are NOT NULL whatever the column definition says
                for col in columns.iter_mut().filter(|c| pk_names.contains(&c.name)) {
                    col.nullable = false;
                }
                primary_key = Some(PrimaryKey { columns: pk_names });
            }
            TableConstraint::ForeignKey(ForeignKeyConstraint {
                columns: fk_cols,
                foreign_table,
                referred_columns,
                ..
            }) => {
                for (col, ref_col) in fk_cols.iter().zip(referred_columns.iter()) {
                    foreign_keys.push(ForeignKeyMetadata {
                        column_name: extract_ident(col),
                        referenced_table: extract_table_name(foreign_table),
                        referenced_column: extract_ident(ref_col),
                    });
                }
            }
            _ => {}
        }
    }

    TableMetadata {
        name,
        columns,
        foreign_keys,
        primary_key,
    }
}

/// Extract column metadata; the flag tells whether the column is declared PRIMARY KEY
fn extract_column_metadata(col_def: &sqlparser::ast::ColumnDef) -> (ColumnMetadata, bool) {
    let name = extract_ident(&col_def.name);
    let data_type = format!("{}", col_def.data_type);
    let enum_values = extract_enum_values(&col_def.data_type);

    let mut nullable = true;
    let mut default_value = None;
    let mut is_auto_increment = data_type.to_uppercase().contains("SERIAL");
    let mut col_is_primary = false;
    let mut comment = None;

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull => {
                nullable = false;
            }
            ColumnOption::Null => {
                nullable = true;
            }
            ColumnOption::Default(expr) => {
                default_value = Some(format!("{}", expr));
            }
            ColumnOption::PrimaryKey(_) => {
                col_is_primary = true;
                nullable = false;
            }
            ColumnOption::Comment(c) => {
                comment = Some(c.clone());
            }
            ColumnOption::DialectSpecific(tokens) => {
                // AUTO_INCREMENT (MySQL) / AUTOINCREMENT (SQLite)
                let token_str = tokens
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_uppercase();
                if token_str.contains("AUTO_INCREMENT") || token_str.contains("AUTOINCREMENT") {
                    is_auto_increment = true;
                }
            }
            _ => {}
        }
    }

    let column = ColumnMetadata {
        name,
        data_type,
        nullable,
        default_value,
        is_auto_increment,
        enum_values,
        comment,
    };

    (column, col_is_primary)
}

/// Extract enum values from a data type
fn extract_enum_values(data_type: &DataType) -> Option<Vec<String>> {
    match data_type {
        DataType::Enum(members, _) => Some(
            members
                .iter()
                .map(|m| match m {
                    EnumMember::Name(s) => s.clone(),
                    EnumMember::NamedValue(s, _) => s.clone(),
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Last part of a possibly qualified name (`shop.book` -> `book`)
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

fn extract_ident(ident: &Ident) -> String {
    ident.value.clone()
}

fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}
