//! Configuration for form type generation

pub mod defaults;
mod settings;

pub use settings::FormGenConfig;
