//! Dependency Injection
//!
//! [`BindingTable`] holds manual wiring; [`Injector`] resolves injection
//! points against bindings and the registry and builds wired instances.

pub mod bindings;
pub mod injector;

pub use bindings::BindingTable;
pub use injector::Injector;
