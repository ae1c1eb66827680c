//! # CDI
//!
//! Dependency injection and method interception runtime.
//!
//! Types register themselves in a compile-time manifest; the [`Injector`]
//! finds an implementation for every declared injection point, wires it in
//! recursively and wraps intercepted types in a proxy decorator whose calls
//! pass through an ordered interceptor chain.
//!
//! ## Example
//!
//! ```ignore
//! use cdi::Injector;
//!
//! let injector = Injector::shared()?;
//! injector.bind("<Nameable>", "FrenchGreeter")?;
//! let greeter = injector.resolve_as::<dyn Nameable>("<Nameable>")?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - descriptors, the component port and the error taxonomy
//! - `application` - registry, injector and interception chain
//! - `infrastructure` - configuration, logging and bootstrap
//! - `cli` - the `cdi` inspection commands
//! - `sample` - greeter and record-store components linked into the binary

/// Domain layer - descriptors, component port and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cdi_domain::*;
}

/// Application layer - registry, injector and interception
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use cdi_application::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use cdi_infrastructure::*;
}

pub mod cli;
pub mod sample;

// Re-export the runtime at the crate root
pub use application::*;

// Re-export bootstrap entry points
pub use infrastructure::{AppConfig, AppContext, ConfigLoader, init_app, init_injector};
