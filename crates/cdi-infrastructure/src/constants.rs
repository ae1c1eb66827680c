//! Infrastructure constants
//!
//! File names, environment variable names and logging defaults.

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cdi.toml";

/// Directory searched for the configuration file, relative to the working
/// directory and to the user configuration directory
pub const DEFAULT_CONFIG_DIR: &str = "cdi";

/// Prefix of configuration environment variables
pub const CONFIG_ENV_PREFIX: &str = "CDI";

/// Separator between nesting levels in environment variable names
/// (`CDI__LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING
// ============================================================================

/// Environment variable holding an `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "CDI_LOG";

/// Log level used when nothing is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name stem of rolling log files
pub const LOG_FILE_STEM: &str = "cdi";
