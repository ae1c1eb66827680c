//! Component Manifest
//!
//! Compile-time registration of every type the injector may construct and
//! every interceptor it may chain. Entries register themselves with
//! `#[linkme::distributed_slice]`; the [`TypeRegistry`](super::TypeRegistry)
//! snapshot is built from these slices on first use.
//!
//! ## Registering a component
//!
//! ```ignore
//! use cdi_application::registry::{COMPONENTS, ComponentEntry, construct};
//!
//! #[linkme::distributed_slice(COMPONENTS)]
//! static ENGLISH_GREETER: ComponentEntry = ComponentEntry {
//!     capabilities: &[Capability {
//!         name: "Nameable",
//!         cast: |c| view(c, |g: Arc<EnglishGreeter>| g as Arc<dyn Nameable>),
//!     }],
//!     factory: Some(construct::<EnglishGreeter>),
//!     ..ComponentEntry::new("EnglishGreeter", "Greets in English")
//! };
//! ```

use std::fmt;
use std::sync::Arc;

use cdi_domain::constants::{ROOT_TYPE_DESCRIPTION, ROOT_TYPE_NAME};
use cdi_domain::{Capability, Component, InjectionPoint};

use crate::interception::{Interceptor, Proxy};

/// Creates an unwired instance with no arguments
pub type Factory = fn() -> Box<dyn Component>;

/// Creates a shared interceptor instance
pub type InterceptorFactory = fn() -> Arc<dyn Interceptor>;

/// Instance lifetime of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// A fresh instance for every injection point
    #[default]
    Prototype,
    /// One instance per injector, created and wired on first request
    Singleton,
}

/// Proxy decorator of an intercepted type
///
/// The decorator implements the same capability traits as the target and
/// forwards every method through its [`Proxy`].
#[derive(Clone, Copy)]
pub struct ProxyEntry {
    /// Builds the decorator around a proxy
    pub wrap: fn(Proxy) -> Arc<dyn Component>,
    /// Capability casts of the decorator type
    pub capabilities: &'static [Capability],
}

/// Registry entry for one component type
pub struct ComponentEntry {
    /// Unique type name used in descriptors and bindings
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Capabilities the type implements, with their casts
    pub capabilities: &'static [Capability],
    /// Concrete supertype chain, nearest first
    pub supertypes: &'static [&'static str],
    /// No-argument constructor; `None` marks an abstract type
    pub factory: Option<Factory>,
    /// Instance lifetime
    pub scope: Scope,
    /// Slots filled after construction
    pub injection_points: &'static [InjectionPoint],
    /// Interceptor names, in chain order
    pub interceptors: &'static [&'static str],
    /// Decorator used when the type is intercepted
    pub proxy: Option<ProxyEntry>,
}

impl ComponentEntry {
    /// Abstract entry with no capabilities; fill the rest with struct update
    /// syntax
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            capabilities: &[],
            supertypes: &[],
            factory: None,
            scope: Scope::Prototype,
            injection_points: &[],
            interceptors: &[],
            proxy: None,
        }
    }

    /// Whether the type can be constructed
    pub fn is_instantiable(&self) -> bool {
        self.factory.is_some()
    }

    /// Whether the type declares an interceptor chain
    pub fn is_intercepted(&self) -> bool {
        !self.interceptors.is_empty()
    }

    /// Capability names declared directly on this type
    pub fn capability_names(&self) -> impl Iterator<Item = &'static str> {
        self.capabilities.iter().map(|capability| capability.name)
    }
}

impl fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentEntry")
            .field("name", &self.name)
            .field("capabilities", &self.capability_names().collect::<Vec<_>>())
            .field("supertypes", &self.supertypes)
            .field("instantiable", &self.is_instantiable())
            .field("scope", &self.scope)
            .field("injection_points", &self.injection_points)
            .field("interceptors", &self.interceptors)
            .finish_non_exhaustive()
    }
}

/// Registry entry for one interceptor type
pub struct InterceptorEntry {
    /// Unique interceptor name referenced by component entries
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Creates the instance shared by every call on one target type
    pub factory: InterceptorFactory,
}

impl fmt::Debug for InterceptorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

// Auto-collection via linkme distributed slices - entries submit at compile time
#[linkme::distributed_slice]
pub static COMPONENTS: [ComponentEntry] = [..];

#[linkme::distributed_slice]
pub static INTERCEPTORS: [InterceptorEntry] = [..];

/// Factory helper for `ComponentEntry::factory`
pub fn construct<T: Component + Default>() -> Box<dyn Component> {
    Box::new(T::default())
}

/// Factory helper for `InterceptorEntry::factory`
pub fn instantiate<I: Interceptor + Default + 'static>() -> Arc<dyn Interceptor> {
    Arc::new(I::default())
}

/// Wrap helper for `ProxyEntry::wrap`
pub fn decorate<D: Component + From<Proxy>>(proxy: Proxy) -> Arc<dyn Component> {
    Arc::new(D::from(proxy))
}

/// Placeholder root type resolved for `@` declarations
#[derive(Debug, Default)]
pub struct Object;

impl Component for Object {}

/// Built-in entry every registry contains
pub static ROOT_ENTRY: ComponentEntry = ComponentEntry {
    factory: Some(construct::<Object>),
    ..ComponentEntry::new(ROOT_TYPE_NAME, ROOT_TYPE_DESCRIPTION)
};
