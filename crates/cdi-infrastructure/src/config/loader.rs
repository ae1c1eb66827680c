//! Configuration loader
//!
//! Sources are merged in this order, later ones overriding earlier ones:
//!
//! 1. `AppConfig::default()`
//! 2. the TOML file given with [`ConfigLoader::with_config_path`], or the
//!    first `cdi.toml` found in the default locations
//! 3. environment variables such as `CDI__LOGGING__LEVEL=debug`

use std::env;
use std::path::{Path, PathBuf};

use cdi_domain::{CapabilityDescriptor, Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        let file = match &self.config_path {
            Some(path) => Some(path.clone()),
            None => Self::find_default_config_path(),
        };
        if let Some(path) = file {
            let exists = path.exists();
            if exists {
                figment = figment.merge(Toml::file(&path));
            }
            log_config_loaded(&path, exists);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;
        validate_app_config(&config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;
        Ok(())
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing file among the default locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

/// Validate application configuration
///
/// Rejects invalid log levels, malformed binding descriptors and empty or
/// invalid type names. Whether the named types exist is only known to the
/// registry and is checked at bootstrap.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;

    for binding in &config.injection.bindings {
        CapabilityDescriptor::parse(&binding.requested).map_err(|e| {
            Error::configuration_with_source(
                format!("Invalid binding descriptor '{}'", binding.requested),
                e,
            )
        })?;
        validate_type_name(&binding.implementation, "binding implementation")?;
    }

    for type_name in &config.injection.excluded_from_interception {
        validate_type_name(type_name, "interception exclusion")?;
    }
    Ok(())
}

fn validate_type_name(type_name: &str, role: &str) -> Result<()> {
    if type_name.trim().is_empty() {
        return Err(Error::configuration(format!("Empty type name in {role}")));
    }
    CapabilityDescriptor::concrete(type_name)
        .map(|_| ())
        .map_err(|e| Error::configuration_with_source(format!("Invalid type name in {role}"), e))
}
