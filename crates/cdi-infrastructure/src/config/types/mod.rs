//! Configuration types module

pub mod app;
pub mod injection;
pub mod logging;

// Re-export main types
pub use app::*;
