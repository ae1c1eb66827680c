//! Injection Point Declarations

use crate::error::Result;
use crate::value_objects::CapabilityDescriptor;

/// Value Object: a named slot a component needs filled at creation time
///
/// Injection points are declared statically next to the component's
/// registry entry, so every field is `'static` and the constructors are
/// `const`.
///
/// ## Example
///
/// ```rust
/// use cdi_domain::value_objects::InjectionPoint;
///
/// const GREETER: InjectionPoint = InjectionPoint::new("greeter", "<Nameable>");
/// const FRENCH: InjectionPoint = InjectionPoint::new("greeter", "<Nameable>").with_type("FrenchGreeter");
///
/// assert_eq!(GREETER.type_override, None);
/// assert_eq!(FRENCH.type_override, Some("FrenchGreeter"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionPoint {
    /// Slot name passed back to [`Component::inject`](crate::ports::Component::inject)
    pub slot: &'static str,
    /// Declaration text of the needed capability
    pub descriptor: &'static str,
    /// Exact implementation type narrowing the declared need
    pub type_override: Option<&'static str>,
}

impl InjectionPoint {
    /// Declare a slot with the capability it needs
    pub const fn new(slot: &'static str, descriptor: &'static str) -> Self {
        Self {
            slot,
            descriptor,
            type_override: None,
        }
    }

    /// Narrow the declared need to one exact implementation type
    #[must_use]
    pub const fn with_type(mut self, type_name: &'static str) -> Self {
        self.type_override = Some(type_name);
        self
    }

    /// Parse the declared descriptor
    pub fn declared(&self) -> Result<CapabilityDescriptor> {
        CapabilityDescriptor::parse(self.descriptor)
    }

    /// Descriptor actually used for resolution: the override, when present,
    /// replaces the declared need with a concrete descriptor
    pub fn effective(&self) -> Result<CapabilityDescriptor> {
        self.declared()?.narrowed(self.type_override)
    }
}
