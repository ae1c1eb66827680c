//! Component Port
//!
//! Every type the injector constructs implements [`Component`]. The trait
//! carries the slot-assignment hook used during wiring; capability views are
//! produced by the [`Capability`] cast functions listed in the type's registry
//! entry, since Rust offers no runtime trait-object conversion.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use cdi_domain::ports::{Capability, Component, view};
//!
//! trait Nameable: Send + Sync {
//!     fn name(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! struct EnglishGreeter;
//!
//! impl Component for EnglishGreeter {}
//!
//! impl Nameable for EnglishGreeter {
//!     fn name(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! static NAMEABLE: Capability = Capability {
//!     name: "Nameable",
//!     cast: |component| view(component, |g: Arc<EnglishGreeter>| g as Arc<dyn Nameable>),
//! };
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use downcast_rs::{DowncastSync, impl_downcast};

use crate::error::{Error, Result};

/// Type-erased capability view, holding an `Arc<dyn SomeCapability>`
pub type CapabilityView = Box<dyn Any + Send + Sync>;

/// Produces a capability view of a component, or `None` when the component
/// is not of the type the cast was written for
pub type CastFn = fn(Arc<dyn Component>) -> Option<CapabilityView>;

/// A type managed by the injector
///
/// Components are constructed without arguments by their registry factory,
/// then receive one [`inject`](Component::inject) call per declared
/// injection point before they are shared.
pub trait Component: DowncastSync {
    /// Assign a resolved dependency to the named slot
    ///
    /// Types without injection points keep the default, which rejects every
    /// slot.
    fn inject(&mut self, slot: &str, value: Resolved) -> Result<()> {
        let _ = value;
        Err(Error::unknown_slot(std::any::type_name::<Self>(), slot))
    }
}

impl_downcast!(sync Component);

/// A capability a component implements, with the cast producing its view
#[derive(Clone, Copy)]
pub struct Capability {
    /// Capability name used in `<Name>` declarations
    pub name: &'static str,
    /// Converts a component into `Arc<dyn Capability>`
    pub cast: CastFn,
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability").field("name", &self.name).finish()
    }
}

/// Build a capability view for components of concrete type `T`
///
/// Intended for [`Capability::cast`] functions; `coerce` performs the unsizing
/// coercion `Arc<T>` to `Arc<dyn C>` that only the concrete type can express.
pub fn view<T, C>(component: Arc<dyn Component>, coerce: fn(Arc<T>) -> Arc<C>) -> Option<CapabilityView>
where
    T: Component,
    C: ?Sized + Send + Sync + 'static,
{
    component
        .downcast_arc::<T>()
        .ok()
        .map(|concrete| Box::new(coerce(concrete)) as CapabilityView)
}

/// A fully wired instance returned by the injector
///
/// Holds the (possibly proxied) instance together with the casts able to
/// view it as one of its capabilities.
#[derive(Clone)]
pub struct Resolved {
    type_name: &'static str,
    instance: Arc<dyn Component>,
    capabilities: Vec<&'static [Capability]>,
    proxied: bool,
}

impl Resolved {
    /// Wrap a wired instance
    ///
    /// `capabilities` lists cast tables in lookup order: the type's own
    /// table first, then those of its supertypes.
    pub fn new(
        type_name: &'static str,
        instance: Arc<dyn Component>,
        capabilities: Vec<&'static [Capability]>,
        proxied: bool,
    ) -> Self {
        Self {
            type_name,
            instance,
            capabilities,
            proxied,
        }
    }

    /// Registry name of the implementation type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether calls go through an interception proxy
    pub fn is_proxied(&self) -> bool {
        self.proxied
    }

    /// The wired instance (the proxy decorator when proxied)
    pub fn instance(&self) -> &Arc<dyn Component> {
        &self.instance
    }

    /// Names of the capabilities this instance can be viewed as
    pub fn capability_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.capabilities
            .iter()
            .flat_map(|table| table.iter().map(|capability| capability.name))
    }

    /// Downcast to the concrete Rust type
    ///
    /// Proxied instances downcast to their decorator type, not to the target.
    pub fn downcast<T: Component>(self) -> Result<Arc<T>> {
        let type_name = self.type_name;
        self.instance
            .downcast_arc::<T>()
            .map_err(|_| Error::capability_mismatch(type_name, std::any::type_name::<T>()))
    }

    /// View the instance as `Arc<C>`, typically `Arc<dyn SomeCapability>`
    pub fn into_capability<C>(self) -> Result<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        for table in &self.capabilities {
            for capability in *table {
                let Some(view) = (capability.cast)(Arc::clone(&self.instance)) else {
                    continue;
                };
                if let Ok(arc) = view.downcast::<Arc<C>>() {
                    return Ok(*arc);
                }
            }
        }
        Err(Error::capability_mismatch(
            self.type_name,
            std::any::type_name::<C>(),
        ))
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("type_name", &self.type_name)
            .field("proxied", &self.proxied)
            .field("capabilities", &self.capability_names().collect::<Vec<_>>())
            .finish()
    }
}
