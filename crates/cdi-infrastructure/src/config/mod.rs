//! Configuration
//!
//! [`AppConfig`] loaded by [`ConfigLoader`] from defaults, a TOML file and
//! `CDI__` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, BindingConfig, InjectionConfig, LoggingConfig};
