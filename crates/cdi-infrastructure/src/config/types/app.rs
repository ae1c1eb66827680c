//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::injection::{BindingConfig, InjectionConfig};
pub use super::logging::LoggingConfig;

/// Root of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging setup
    pub logging: LoggingConfig,
    /// Bindings and interception exclusions
    pub injection: InjectionConfig,
}
