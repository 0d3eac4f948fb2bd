//! Per-invocation execution context

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::lifecycle::ConnectionFactory;
use crate::mysql::MySqlConnectionFactory;

/// Connection factories keyed by adapter identifier.
///
/// Keys are compared case-insensitively (`mysql`, `MySQL`).
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    factories: HashMap<String, Arc<dyn ConnectionFactory>>,
}

impl AdapterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for an adapter
    pub fn register(&mut self, adapter: &str, factory: Arc<dyn ConnectionFactory>) {
        self.factories.insert(adapter.to_ascii_lowercase(), factory);
    }

    /// Look up the factory for an adapter
    pub fn get(&self, adapter: &str) -> Option<Arc<dyn ConnectionFactory>> {
        self.factories.get(&adapter.to_ascii_lowercase()).cloned()
    }

    /// Registered adapter identifiers, sorted
    pub fn adapters(&self) -> Vec<&str> {
        let mut adapters: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        adapters.sort_unstable();
        adapters
    }
}

/// Everything a command needs to open connections.
///
/// Built once per command invocation and passed down explicitly.
#[derive(Clone)]
pub struct ExecutionContext {
    adapters: AdapterRegistry,
}

impl ExecutionContext {
    /// Context with the built-in adapters registered
    pub fn new() -> Self {
        let mut adapters = AdapterRegistry::new();
        adapters.register("mysql", Arc::new(MySqlConnectionFactory));
        Self { adapters }
    }

    /// Context with no adapters
    pub fn empty() -> Self {
        Self {
            adapters: AdapterRegistry::new(),
        }
    }

    /// Register an additional adapter
    pub fn register_adapter(&mut self, adapter: &str, factory: Arc<dyn ConnectionFactory>) {
        self.adapters.register(adapter, factory);
    }

    /// The adapter registry
    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    /// Resolve the connection factory for an adapter
    pub fn connection_factory(&self, adapter: &str) -> Result<Arc<dyn ConnectionFactory>> {
        self.adapters
            .get(adapter)
            .ok_or_else(|| Error::UnknownAdapter(adapter.to_string()))
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_adapters() {
        let context = ExecutionContext::new();
        assert_eq!(context.adapters().adapters(), vec!["mysql"]);
        assert!(context.connection_factory("MySQL").is_ok());
    }

    #[test]
    fn test_unknown_adapter() {
        let context = ExecutionContext::empty();
        assert!(matches!(
            context.connection_factory("pgsql"),
            Err(Error::UnknownAdapter(name)) if name == "pgsql"
        ));
    }
}
