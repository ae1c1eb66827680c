//! Domain Port Interfaces
//!
//! Contracts between the runtime and application types. Application types
//! implement [`Component`] so the injector can construct them, fill their
//! injection slots and hand them out as capability views.

/// Component contract and resolved instances
pub mod component;

pub use component::{Capability, CapabilityView, CastFn, Component, Resolved, view};
