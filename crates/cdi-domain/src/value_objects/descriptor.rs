//! Capability Descriptors
//!
//! A capability descriptor states what kind of object an injection point
//! needs. Descriptors are parsed from their declaration text:
//!
//! | Declaration | Descriptor |
//! |-------------|------------|
//! | `<Nameable>` | capability set with one capability |
//! | `<Nameable><Clone>` | capability set, every capability required |
//! | `EnglishGreeter` | one concrete type |
//! | `@` | any object |

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::{ANY_MARKER, CAPABILITY_CLOSE, CAPABILITY_OPEN, PATH_SEPARATOR};
use crate::error::{Error, Result};

/// Kind of a [`CapabilityDescriptor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// One exact type
    Concrete,
    /// A non-empty set of capabilities, all of which must be implemented
    CapabilitySet,
    /// No constraint at all
    Any,
}

/// Value Object: non-empty set of capability names
///
/// Equality ignores declaration order, so `<A><B>` and `<B><A>` describe the
/// same requirement and share a binding key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapabilitySet(BTreeSet<String>);

impl CapabilitySet {
    /// Build a set from capability names
    ///
    /// Fails with [`Error::MalformedDescriptor`] when no name is given.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(Error::malformed_descriptor(
                "",
                "a capability set needs at least one capability",
            ));
        }
        Ok(Self(names))
    }

    /// Iterate the capability names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of capabilities in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` is part of the set
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Whether a type providing `provided` satisfies every capability
    pub fn is_satisfied_by(&self, provided: &BTreeSet<&str>) -> bool {
        self.0.iter().all(|name| provided.contains(name.as_str()))
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.0 {
            write!(f, "{CAPABILITY_OPEN}{name}{CAPABILITY_CLOSE}")?;
        }
        Ok(())
    }
}

/// Value Object: what an injection point needs
///
/// ## Example
///
/// ```rust
/// use cdi_domain::value_objects::{CapabilityDescriptor, DescriptorKind};
///
/// let descriptor = CapabilityDescriptor::parse("<Nameable><Loggable>").unwrap();
/// assert_eq!(descriptor.kind(), DescriptorKind::CapabilitySet);
/// assert_eq!(descriptor, CapabilityDescriptor::parse("<Loggable><Nameable>").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CapabilityDescriptor {
    /// One exact type, by registry name
    Concrete(String),
    /// Every listed capability must be implemented
    CapabilitySet(CapabilitySet),
    /// Any object; resolves to the root placeholder type
    Any,
}

impl CapabilityDescriptor {
    /// Parse a declaration string
    pub fn parse(declaration: &str) -> Result<Self> {
        let text = declaration.trim();
        if text.is_empty() {
            return Err(Error::malformed_descriptor(declaration, "declaration is empty"));
        }
        if text == ANY_MARKER {
            return Ok(Self::Any);
        }
        if text.starts_with(CAPABILITY_OPEN) {
            return parse_capability_chain(declaration, text).map(Self::CapabilitySet);
        }
        if is_type_name(text) {
            return Ok(Self::Concrete(text.to_string()));
        }
        Err(Error::malformed_descriptor(
            declaration,
            format!("expected a type name, '{CAPABILITY_OPEN}Capability{CAPABILITY_CLOSE}' markers or '{ANY_MARKER}'"),
        ))
    }

    /// Descriptor for one concrete type
    ///
    /// Fails with [`Error::MalformedDescriptor`] when the name is not a valid
    /// type name.
    pub fn concrete(type_name: &str) -> Result<Self> {
        let name = type_name.trim();
        if !is_type_name(name) {
            return Err(Error::malformed_descriptor(
                type_name,
                "not a valid type name",
            ));
        }
        Ok(Self::Concrete(name.to_string()))
    }

    /// Descriptor used for registry search once a call site narrows its
    /// need to one exact type
    ///
    /// Without an override the descriptor is returned unchanged.
    pub fn narrowed(&self, type_override: Option<&str>) -> Result<Self> {
        match type_override {
            Some(type_name) => Self::concrete(type_name),
            None => Ok(self.clone()),
        }
    }

    /// Kind of this descriptor
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Concrete(_) => DescriptorKind::Concrete,
            Self::CapabilitySet(_) => DescriptorKind::CapabilitySet,
            Self::Any => DescriptorKind::Any,
        }
    }

    /// The concrete type name, if this is a concrete descriptor
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Concrete(name) => Some(name),
            _ => None,
        }
    }

    /// The capability set, if this is a capability descriptor
    pub fn capabilities(&self) -> Option<&CapabilitySet> {
        match self {
            Self::CapabilitySet(set) => Some(set),
            _ => None,
        }
    }
}

impl FromStr for CapabilityDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CapabilityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(name) => f.write_str(name),
            Self::CapabilitySet(set) => fmt::Display::fmt(set, f),
            Self::Any => f.write_str(ANY_MARKER),
        }
    }
}

fn parse_capability_chain(declaration: &str, text: &str) -> Result<CapabilitySet> {
    let mut names = BTreeSet::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(body) = rest.strip_prefix(CAPABILITY_OPEN) else {
            return Err(Error::malformed_descriptor(
                declaration,
                format!("unexpected '{rest}' after capability marker"),
            ));
        };
        let Some(end) = body.find(CAPABILITY_CLOSE) else {
            return Err(Error::malformed_descriptor(
                declaration,
                "unterminated capability marker",
            ));
        };
        let name = body[..end].trim();
        if !is_type_name(name) {
            return Err(Error::malformed_descriptor(
                declaration,
                format!("'{name}' is not a valid capability name"),
            ));
        }
        names.insert(name.to_string());
        rest = body[end + CAPABILITY_CLOSE.len_utf8()..].trim_start();
    }

    CapabilitySet::new(names).map_err(|_| {
        Error::malformed_descriptor(declaration, "a capability set needs at least one capability")
    })
}

/// Identifier segments joined by `::`
fn is_type_name(text: &str) -> bool {
    !text.is_empty() && text.split(PATH_SEPARATOR).all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
