//! Connection descriptors and the server-level ("serverless") transform
//!
//! A connection string is a list of `key=value` clauses separated by `;`,
//! optionally prefixed by a driver name (`mysql:host=localhost;dbname=shop`).
//! Creating or dropping a database has to connect before that database
//! exists, so [`strip_database_name`] derives a descriptor with the
//! `dbname=` / `Database=` clause removed.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How to reach a database server through a named connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    /// Connection name (e.g. `default`, `bookstore`)
    #[serde(default)]
    pub name: String,

    /// Adapter identifier used to pick a connection factory (e.g. `mysql`)
    pub adapter: String,

    /// Connection string
    pub dsn: String,

    /// User to authenticate as
    #[serde(default)]
    pub user: Option<String>,

    /// Password for `user`
    #[serde(default)]
    pub password: Option<String>,
}

impl ConnectionDescriptor {
    /// Create a descriptor without credentials
    pub fn new(name: impl Into<String>, adapter: impl Into<String>, dsn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adapter: adapter.into(),
            dsn: dsn.into(),
            user: None,
            password: None,
        }
    }

    /// Attach credentials
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// A copy of this descriptor pointing at a different connection string
    pub fn with_dsn(&self, dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            ..self.clone()
        }
    }

    /// The database name selected by the connection string, if any
    pub fn database_name(&self) -> Option<String> {
        split_database_clause(&self.dsn).map(|(name, _)| name)
    }

    /// Structured view over the connection string clauses
    pub fn parts(&self) -> DsnParts<'_> {
        DsnParts::parse(&self.dsn)
    }
}

/// Result of [`strip_database_name`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedDescriptor {
    /// The database name that was removed
    pub database_name: String,

    /// Descriptor connecting to the server without selecting a database
    pub descriptor: ConnectionDescriptor,
}

/// Remove the database-name clause from a descriptor.
///
/// Fails with [`Error::NoDatabaseNameFound`] when the connection string has no
/// `dbname=` / `Database=` clause or the clause is empty.
pub fn strip_database_name(descriptor: &ConnectionDescriptor) -> Result<StrippedDescriptor> {
    let (database_name, dsn) = split_database_clause(&descriptor.dsn)
        .ok_or_else(|| Error::NoDatabaseNameFound(descriptor.dsn.clone()))?;

    Ok(StrippedDescriptor {
        database_name,
        descriptor: descriptor.with_dsn(dsn),
    })
}

/// Locate the database-name clause and cut exactly that span out of `dsn`.
///
/// Returns the extracted name and the remaining connection string. The
/// removal works on the byte range of the match, so a clause elsewhere whose
/// value happens to equal the database name is left alone.
pub fn split_database_clause(dsn: &str) -> Option<(String, String)> {
    let caps = database_clause().captures(dsn)?;
    let clause = caps.get(0)?;
    let separator = caps.get(1)?;
    let name = caps.get(2)?.as_str().trim();

    if name.is_empty() {
        return None;
    }

    let (start, end) = if separator.as_str() == ";" {
        (clause.start(), clause.end())
    } else {
        // First clause: keep the driver prefix, take the following `;` instead
        let end = if dsn[clause.end()..].starts_with(';') {
            clause.end() + 1
        } else {
            clause.end()
        };
        (separator.end(), end)
    };

    let mut stripped = String::with_capacity(dsn.len() - (end - start));
    stripped.push_str(&dsn[..start]);
    stripped.push_str(&dsn[end..]);

    Some((name.to_string(), stripped))
}

fn database_clause() -> &'static Regex {
    static CLAUSE: OnceLock<Regex> = OnceLock::new();
    CLAUSE.get_or_init(|| {
        Regex::new(r"(^(?:[A-Za-z0-9_]+:)?|;)\s*(?:dbname|Database)=([^;]*)")
            .expect("database clause pattern is valid")
    })
}

/// Clauses of a connection string, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsnParts<'a> {
    /// Driver prefix (`mysql` in `mysql:host=...`)
    pub driver: Option<&'a str>,

    /// `key=value` clauses; clauses without `=` are kept with an empty value
    pub clauses: Vec<(&'a str, &'a str)>,
}

impl<'a> DsnParts<'a> {
    /// Split a connection string into driver prefix and clauses
    pub fn parse(dsn: &'a str) -> Self {
        let (driver, rest) = match dsn.split_once(':') {
            Some((prefix, rest)) if !prefix.contains('=') && !prefix.contains(';') => {
                (Some(prefix.trim()), rest)
            }
            _ => (None, dsn),
        };

        let clauses = rest
            .split(';')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(|clause| match clause.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (clause, ""),
            })
            .collect();

        Self { driver, clauses }
    }

    /// Value of the first clause with the given key
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.clauses
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(dsn: &str) -> ConnectionDescriptor {
        ConnectionDescriptor::new("default", "mysql", dsn)
    }

    #[test]
    fn test_strip_middle_clause() {
        let stripped =
            strip_database_name(&descriptor("host=localhost;dbname=shop;charset=utf8")).unwrap();
        assert_eq!(stripped.database_name, "shop");
        assert_eq!(stripped.descriptor.dsn, "host=localhost;charset=utf8");
        assert_eq!(stripped.descriptor.adapter, "mysql");
        assert_eq!(stripped.descriptor.name, "default");
    }

    #[test]
    fn test_strip_database_key() {
        let (name, dsn) = split_database_clause("Server=db1;Database=orders;Uid=app").unwrap();
        assert_eq!(name, "orders");
        assert_eq!(dsn, "Server=db1;Uid=app");
    }

    #[test]
    fn test_strip_last_clause() {
        let (name, dsn) = split_database_clause("mysql:host=localhost;dbname=shop").unwrap();
        assert_eq!(name, "shop");
        assert_eq!(dsn, "mysql:host=localhost");
    }

    #[test]
    fn test_strip_first_clause_after_driver() {
        let (name, dsn) = split_database_clause("mysql:dbname=shop;host=localhost").unwrap();
        assert_eq!(name, "shop");
        assert_eq!(dsn, "mysql:host=localhost");
    }

    #[test]
    fn test_colon_inside_value_is_not_a_separator() {
        let (name, dsn) =
            split_database_clause("mysql:host=h;password=pa:dbname=x;dbname=shop").unwrap();
        assert_eq!(name, "shop");
        assert_eq!(dsn, "mysql:host=h;password=pa:dbname=x");

        assert!(split_database_clause("host=h;password=pa:dbname=x").is_none());
    }

    #[test]
    fn test_strip_only_clause() {
        let (name, dsn) = split_database_clause("dbname=shop").unwrap();
        assert_eq!(name, "shop");
        assert_eq!(dsn, "");
    }

    #[test]
    fn test_name_repeated_in_other_clauses() {
        // The database name also appears as a host and a user value
        let (name, dsn) = split_database_clause("host=shop;dbname=shop;user=shop").unwrap();
        assert_eq!(name, "shop");
        assert_eq!(dsn, "host=shop;user=shop");

        let (name, dsn) = split_database_clause("host=shopdb;dbname=shop;charset=utf8").unwrap();
        assert_eq!(name, "shop");
        assert_eq!(dsn, "host=shopdb;charset=utf8");
    }

    #[test]
    fn test_key_must_start_a_clause() {
        assert!(split_database_clause("host=localhost;mydbname=shop").is_none());
        assert!(split_database_clause("host=localhost;xDatabase=shop").is_none());
    }

    #[test]
    fn test_database_key_is_case_sensitive() {
        assert!(split_database_clause("host=localhost;database=shop").is_none());
        assert!(split_database_clause("host=localhost;DBNAME=shop").is_none());
    }

    #[test]
    fn test_no_database_name() {
        let err = strip_database_name(&descriptor("mysql:host=localhost;charset=utf8")).unwrap_err();
        assert!(matches!(err, Error::NoDatabaseNameFound(_)));
    }

    #[test]
    fn test_empty_database_name() {
        let err = strip_database_name(&descriptor("host=localhost;dbname=;port=3306")).unwrap_err();
        assert!(matches!(err, Error::NoDatabaseNameFound(_)));
    }

    #[test]
    fn test_original_descriptor_untouched() {
        let original = descriptor("host=localhost;dbname=shop");
        let stripped = strip_database_name(&original).unwrap();
        assert_eq!(original.dsn, "host=localhost;dbname=shop");
        assert_ne!(stripped.descriptor, original);
        assert_eq!(original.database_name().as_deref(), Some("shop"));
        assert!(stripped.descriptor.database_name().is_none());
    }

    #[test]
    fn test_parse_parts() {
        let parts = DsnParts::parse("mysql:host=127.0.0.1;port=3307;dbname=shop");
        assert_eq!(parts.driver, Some("mysql"));
        assert_eq!(parts.get("host"), Some("127.0.0.1"));
        assert_eq!(parts.get("port"), Some("3307"));
        assert_eq!(parts.get("dbname"), Some("shop"));
        assert_eq!(parts.get("charset"), None);

        let parts = DsnParts::parse("host=localhost;charset=utf8");
        assert_eq!(parts.driver, None);
        assert_eq!(parts.clauses.len(), 2);
    }
}
