//! # CDI Domain Layer
//!
//! Core types shared by every layer of the context and dependency injection
//! runtime. Nothing in this crate performs resolution or dispatch; it only
//! describes *what* is needed and *how failures are reported*.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Capability descriptors and injection point declarations |
//! | [`ports`] | The [`Component`](ports::Component) contract and resolved instances |
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`constants`] | Descriptor syntax markers and built-in type names |

/// Descriptor syntax markers and built-in type names
pub mod constants;
/// Error taxonomy
pub mod error;
/// Contracts implemented by wired components
pub mod ports;
/// Immutable value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{Capability, CapabilityView, Component, Resolved};
pub use value_objects::{CapabilityDescriptor, CapabilitySet, DescriptorKind, InjectionPoint};
