//! Component Registry System
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Component Registration Flow                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Type defines:     #[linkme::distributed_slice(COMPONENTS)]  │
//! │                       static ENTRY: ComponentEntry = ...        │
//! │                              ↓                                  │
//! │  2. Registry declares: pub static COMPONENTS: [Entry] = [..]    │
//! │                              ↓                                  │
//! │  3. First resolution: TypeRegistry::global() snapshots slices   │
//! │                              ↓                                  │
//! │  4. Injector asks:    candidates_for("<Nameable>")              │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod manifest;
pub mod type_registry;

pub use manifest::{
    COMPONENTS, ComponentEntry, Factory, INTERCEPTORS, InterceptorEntry, InterceptorFactory,
    Object, ProxyEntry, ROOT_ENTRY, Scope, construct, decorate, instantiate,
};
pub use type_registry::TypeRegistry;
