//! Console configuration (`ormctl.toml`)

pub mod defaults;
mod settings;

pub use settings::{BundleConfig, ConnectionConfig, ConsoleConfig, FormSettings};
