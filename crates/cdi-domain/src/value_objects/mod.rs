//! Domain Value Objects
//!
//! Immutable values describing what the injector must provide.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`CapabilityDescriptor`] | Parsed "what is needed" declaration |
//! | [`CapabilitySet`] | Order-insensitive set of required capabilities |
//! | [`InjectionPoint`] | Named slot with its declared need |

/// Capability descriptors and their parser
pub mod descriptor;
/// Injection point declarations
pub mod injection_point;

pub use descriptor::{CapabilityDescriptor, CapabilitySet, DescriptorKind};
pub use injection_point::InjectionPoint;
