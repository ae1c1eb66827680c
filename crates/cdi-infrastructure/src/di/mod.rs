//! Dependency injection composition root

pub mod bootstrap;

pub use bootstrap::{AppContext, apply_injection_config, init_app, init_injector};
