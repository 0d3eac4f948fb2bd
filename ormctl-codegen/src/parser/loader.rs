//! Schema source discovery and loading

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::metadata::{DatabaseMetadata, TableMetadata};
use super::schema_parser::{parse_named_schema, resolve_dialect};
use crate::config::defaults;
use crate::error::{CodegenError, Result};

/// Find `*schema.sql` files under `dir`, sorted by path.
///
/// A missing directory yields no files.
pub fn find_schema_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let is_schema = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(defaults::SCHEMA_FILE_SUFFIX));
        if entry.file_type().is_file() && is_schema {
            files.push(entry.into_path());
        }
    }
    files.sort();

    debug!("Found {} schema files in {:?}", files.len(), dir);
    Ok(files)
}

/// Database name derived from a schema file name.
///
/// `bookstore.schema.sql` and `bookstore_schema.sql` give `bookstore`; a bare
/// `schema.sql` gives `default`.
pub fn database_name_for(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name
        .strip_suffix(defaults::SCHEMA_FILE_SUFFIX)
        .unwrap_or(&file_name)
        .trim_end_matches(&['.', '_', '-'][..]);

    if stem.is_empty() {
        defaults::DATABASE_NAME.to_string()
    } else {
        stem.to_string()
    }
}

/// Load every schema file into a database, in the order given
pub fn load_schemas(files: &[PathBuf], platform: &str) -> Result<Vec<DatabaseMetadata>> {
    let dialect = resolve_dialect(platform)?;

    files
        .iter()
        .map(|path| {
            let sql = std::fs::read_to_string(path)?;
            let tables = parse_named_schema(&path.display().to_string(), &sql, dialect.as_ref())?;
            build_database(database_name_for(path), tables)
        })
        .collect()
}

/// Assemble a database, rejecting tables whose canonical names collide
pub fn build_database(name: String, tables: Vec<TableMetadata>) -> Result<DatabaseMetadata> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for table in &tables {
        let canonical = table.canonical_name();
        if let Some(existing) = seen.get(&canonical) {
            return Err(CodegenError::DuplicateTable {
                database: name,
                existing: existing.to_string(),
                table: table.name.clone(),
                canonical,
            });
        }
        seen.insert(canonical, table.name.as_str());
    }

    debug!("Loaded database {} with {} tables", name, tables.len());
    Ok(DatabaseMetadata { name, tables })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_database_name_for() {
        assert_eq!(database_name_for(Path::new("config/bookstore.schema.sql")), "bookstore");
        assert_eq!(database_name_for(Path::new("bookstore_schema.sql")), "bookstore");
        assert_eq!(database_name_for(Path::new("schema.sql")), "default");
    }

    #[test]
    fn test_find_schema_files_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("shop.schema.sql"), "").unwrap();
        fs::write(dir.path().join("nested/audit.schema.sql"), "").unwrap();
        fs::write(dir.path().join("blog.schema.sql"), "").unwrap();
        fs::write(dir.path().join("notes.sql"), "").unwrap();
        fs::write(dir.path().join("routing.yml"), "").unwrap();

        let files = find_schema_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "blog.schema.sql".to_string(),
                Path::new("nested").join("audit.schema.sql").display().to_string(),
                "shop.schema.sql".to_string(),
            ]
        );
    }

    #[test]
    fn test_find_schema_files_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let files = find_schema_files(&dir.path().join("missing")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_load_schemas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookstore.schema.sql");
        fs::write(
            &path,
            "CREATE TABLE book (id INT PRIMARY KEY, title VARCHAR(255) NOT NULL);\n\
             CREATE TABLE author (id INT PRIMARY KEY, name VARCHAR(128));",
        )
        .unwrap();

        let databases = load_schemas(&[path], "mysql").unwrap();
        assert_eq!(databases.len(), 1);
        assert_eq!(databases[0].name, "bookstore");
        assert_eq!(databases[0].tables.len(), 2);
        assert!(databases[0].get_table("Author").is_some());
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.sql");
        fs::write(
            &path,
            "CREATE TABLE book (id INT PRIMARY KEY);\nCREATE TABLE book (id INT PRIMARY KEY);",
        )
        .unwrap();

        let err = load_schemas(&[path], "mysql").unwrap_err();
        assert!(matches!(
            err,
            CodegenError::DuplicateTable { ref database, ref table, .. } if database == "default" && table == "book"
        ));
    }

    #[test]
    fn test_colliding_canonical_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookstore.schema.sql");
        fs::write(
            &path,
            "CREATE TABLE book_author (id INT PRIMARY KEY);\n\
             CREATE TABLE BookAuthor (id INT PRIMARY KEY);",
        )
        .unwrap();

        let err = load_schemas(&[path], "mysql").unwrap_err();
        match err {
            CodegenError::DuplicateTable {
                database,
                existing,
                table,
                canonical,
            } => {
                assert_eq!(database, "bookstore");
                assert_eq!(existing, "book_author");
                assert_eq!(table, "BookAuthor");
                assert_eq!(canonical, "BookAuthor");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
