//! # CDI Application Layer
//!
//! The resolution engine and the interception chain.
//!
//! ```text
//! Injector::create("Consumer")
//!     │  factory()                         ← manifest entry, no-argument construction
//!     │  for each injection point:
//!     │      BindingTable::lookup_point    ← manual wiring wins
//!     │      TypeRegistry::candidates_for  ← auto-wiring otherwise
//!     │      Injector::create(candidate)   ← recursive
//!     │      Component::inject(slot, ..)
//!     ▼
//! Proxy decorator (when interceptors are declared and the type is not excluded)
//!     │  call → InvocationContext { cursor: 0 }
//!     │  execute() → Interceptor 1 → execute() → Interceptor 2 → execute() → real method
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | Manifest statics and the cached [`TypeRegistry`] snapshot |
//! | [`injection`] | [`BindingTable`] and the [`Injector`] |
//! | [`interception`] | [`InvocationContext`], [`Interceptor`] and [`Proxy`] |

pub mod injection;
pub mod interception;
pub mod registry;

pub use injection::{BindingTable, Injector};
pub use interception::{
    Arguments, InterceptorChain, Interceptor, InvocationContext, InvocationState, Proxy,
};
pub use registry::{
    COMPONENTS, ComponentEntry, INTERCEPTORS, InterceptorEntry, ProxyEntry, Scope, TypeRegistry,
    construct, decorate, instantiate,
};

// Re-export the domain so manifests only need this crate
pub use cdi_domain::{
    Capability, CapabilityDescriptor, CapabilitySet, Component, DescriptorKind, Error,
    InjectionPoint, Resolved, Result, ports::view,
};
