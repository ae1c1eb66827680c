//! Binding Table
//!
//! Manual wiring overrides. A binding maps a requested descriptor to one
//! implementation type and always wins over registry search, which makes it
//! the way to settle ambiguity or substitute test doubles.
//!
//! Concrete requests and capability-set requests live in separate maps.
//! Capability sets are keyed by their normalized (order-free) form, so a
//! binding for `<A><B>` also answers `<B><A>`. `@` requests are keyed as the
//! concrete root placeholder type.

use std::collections::HashMap;

use cdi_domain::constants::ROOT_TYPE_NAME;
use cdi_domain::{CapabilityDescriptor, CapabilitySet};

/// Explicit descriptor → implementation overrides
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    concrete: HashMap<String, String>,
    capabilities: HashMap<CapabilitySet, String>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `requested` to `implementation`, returning the replaced binding
    pub fn bind(
        &mut self,
        requested: &CapabilityDescriptor,
        implementation: impl Into<String>,
    ) -> Option<String> {
        let implementation = implementation.into();
        match requested {
            CapabilityDescriptor::Concrete(name) => {
                self.concrete.insert(name.clone(), implementation)
            }
            CapabilityDescriptor::CapabilitySet(set) => {
                self.capabilities.insert(set.clone(), implementation)
            }
            CapabilityDescriptor::Any => self
                .concrete
                .insert(ROOT_TYPE_NAME.to_string(), implementation),
        }
    }

    /// Remove the binding for `requested`
    pub fn unbind(&mut self, requested: &CapabilityDescriptor) -> Option<String> {
        match requested {
            CapabilityDescriptor::Concrete(name) => self.concrete.remove(name),
            CapabilityDescriptor::CapabilitySet(set) => self.capabilities.remove(set),
            CapabilityDescriptor::Any => self.concrete.remove(ROOT_TYPE_NAME),
        }
    }

    /// Implementation bound to `requested`
    pub fn lookup(&self, requested: &CapabilityDescriptor) -> Option<&str> {
        match requested {
            CapabilityDescriptor::Concrete(name) => self.concrete.get(name),
            CapabilityDescriptor::CapabilitySet(set) => self.capabilities.get(set),
            CapabilityDescriptor::Any => self.concrete.get(ROOT_TYPE_NAME),
        }
        .map(String::as_str)
    }

    /// Implementation bound for an injection point
    ///
    /// A concrete binding of the point's type override is more specific than
    /// a binding of its declared capability set and wins. Once a call site
    /// narrows its need with an override, capability bindings no longer
    /// apply to it.
    pub fn lookup_point(
        &self,
        declared: &CapabilityDescriptor,
        type_override: Option<&str>,
    ) -> Option<&str> {
        match type_override {
            Some(type_name) => self.concrete.get(type_name).map(String::as_str),
            None => self.lookup(declared),
        }
    }

    /// Number of bindings in both maps
    pub fn len(&self) -> usize {
        self.concrete.len() + self.capabilities.len()
    }

    /// Whether no binding exists
    pub fn is_empty(&self) -> bool {
        self.concrete.is_empty() && self.capabilities.is_empty()
    }

    /// Drop every binding
    pub fn clear(&mut self) {
        self.concrete.clear();
        self.capabilities.clear();
    }
}
