//! Schema model and loading from SQL DDL files

mod loader;
mod metadata;
mod schema_parser;

pub use loader::*;
pub use metadata::*;
pub use schema_parser::*;
