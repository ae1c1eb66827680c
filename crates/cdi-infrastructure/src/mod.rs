//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the injection runtime.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration from TOML and environment |
//! | [`di`] | Injector bootstrap from configuration |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extensions for foreign errors |
//! | [`constants`] | File names, environment names and defaults |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader};
pub use di::{AppContext, init_app, init_injector};
pub use error_ext::ErrorContext;
