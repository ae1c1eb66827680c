//! Injector Bootstrap
//!
//! Composition root: builds an [`Injector`] over the global component
//! manifest and applies the bindings and interception exclusions found in
//! the configuration.
//!
//! ```text
//! AppConfig ──▶ init_logging
//!     │
//!     └─ injection ──▶ Injector::global() ──▶ bind(..) / exclude_from_interception(..)
//!                          ↑
//!                    linkme manifest
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?)?;
//! let greeter = context.injector.resolve_as::<dyn Nameable>("<Nameable>")?;
//! ```

use std::sync::Arc;

use cdi_application::Injector;
use cdi_domain::Result;
use tracing::info;

use crate::config::{AppConfig, InjectionConfig};
use crate::logging::init_logging;

/// Configuration and the injector built from it
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Configured injector over the global manifest
    pub injector: Arc<Injector>,
}

/// Initialize logging, then build the configured injector
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    init_logging(&config.logging)?;
    let injector = init_injector(&config.injection)?;
    Ok(AppContext {
        config: Arc::new(config),
        injector,
    })
}

/// Build an injector over the global manifest and configure it
pub fn init_injector(config: &InjectionConfig) -> Result<Arc<Injector>> {
    let injector = Injector::global()?;
    apply_injection_config(&injector, config)?;
    Ok(Arc::new(injector))
}

/// Apply configured bindings and exclusions to an existing injector
///
/// Fails on the first binding or exclusion naming an unknown type.
pub fn apply_injection_config(injector: &Injector, config: &InjectionConfig) -> Result<()> {
    for binding in &config.bindings {
        injector.bind(&binding.requested, &binding.implementation)?;
    }
    for type_name in &config.excluded_from_interception {
        injector.exclude_from_interception(type_name)?;
    }
    info!(
        bindings = config.bindings.len(),
        exclusions = config.excluded_from_interception.len(),
        types = injector.registry().len(),
        "Injector configured"
    );
    Ok(())
}
