//! Injection configuration types
//!
//! Manual wiring and interception exclusions supplied from configuration
//! instead of setup code:
//!
//! ```toml
//! [injection]
//! excluded_from_interception = ["DatabaseStore"]
//!
//! [[injection.bindings]]
//! requested = "<Nameable>"
//! implementation = "FrenchGreeter"
//! ```

use serde::{Deserialize, Serialize};

/// One binding of a requested descriptor to an implementation type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Descriptor text, e.g. `<Nameable>` or `EnglishGreeter`
    pub requested: String,
    /// Registered implementation type name
    pub implementation: String,
}

impl BindingConfig {
    /// Create a binding entry
    pub fn new(requested: impl Into<String>, implementation: impl Into<String>) -> Self {
        Self {
            requested: requested.into(),
            implementation: implementation.into(),
        }
    }
}

/// Injector setup applied at bootstrap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    /// Bindings applied in order; later entries replace earlier ones
    pub bindings: Vec<BindingConfig>,
    /// Types never wrapped in an interception proxy
    pub excluded_from_interception: Vec<String>,
}
