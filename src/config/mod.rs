mod alias_table;
pub mod loader;
pub mod registry_config;

// Re-export commonly used types
pub use registry_config::{Config, DEFAULT_BINDING_CONST, DEFAULT_FACTORY_METHOD};
