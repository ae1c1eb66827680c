//! Type Registry
//!
//! Read-only snapshot of every known component and interceptor, answering
//! "which types satisfy this descriptor".
//!
//! ## Matching rules
//!
//! | Descriptor | Candidates |
//! |------------|------------|
//! | `TypeName` | that type, or `UnknownType` |
//! | `<A><B>` | every instantiable type whose effective capabilities include A and B |
//! | `@` | the root placeholder `Object` |
//!
//! Effective capabilities are the type's own plus those of every type in its
//! supertype chain.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use cdi_domain::constants::ROOT_TYPE_NAME;
use cdi_domain::{Capability, CapabilityDescriptor, Error, Result};
use once_cell::sync::OnceCell;
use tracing::debug;

use super::manifest::{COMPONENTS, ComponentEntry, INTERCEPTORS, InterceptorEntry, ROOT_ENTRY};

static GLOBAL: OnceCell<Arc<TypeRegistry>> = OnceCell::new();

struct RegisteredType {
    entry: &'static ComponentEntry,
    capabilities: BTreeSet<&'static str>,
}

/// Snapshot of the component manifest
pub struct TypeRegistry {
    types: BTreeMap<&'static str, RegisteredType>,
    interceptors: BTreeMap<&'static str, &'static InterceptorEntry>,
}

impl TypeRegistry {
    /// Registry over the process-wide manifest
    ///
    /// Built once behind a first-use barrier; concurrent first callers wait
    /// for the same snapshot. Every later call is a plain read.
    pub fn global() -> Result<Arc<Self>> {
        GLOBAL
            .get_or_try_init(|| {
                let registry = Self::from_entries(COMPONENTS.iter(), INTERCEPTORS.iter())?;
                debug!(
                    types = registry.types.len(),
                    interceptors = registry.interceptors.len(),
                    "Type registry snapshot built"
                );
                Ok(Arc::new(registry))
            })
            .map(Arc::clone)
    }

    /// Registry over an explicit list of entries
    ///
    /// The root placeholder type is always added. Fails with
    /// [`Error::DuplicateType`] when a name appears twice and with
    /// [`Error::UnknownType`] when a supertype chain names an unknown type.
    pub fn from_entries<C, I>(components: C, interceptors: I) -> Result<Self>
    where
        C: IntoIterator<Item = &'static ComponentEntry>,
        I: IntoIterator<Item = &'static InterceptorEntry>,
    {
        let mut entries: BTreeMap<&'static str, &'static ComponentEntry> = BTreeMap::new();
        entries.insert(ROOT_ENTRY.name, &ROOT_ENTRY);
        for entry in components {
            if entries.insert(entry.name, entry).is_some() {
                return Err(Error::DuplicateType {
                    type_name: entry.name.to_string(),
                });
            }
        }

        let mut types = BTreeMap::new();
        for (&name, &entry) in &entries {
            let mut capabilities: BTreeSet<&'static str> = entry.capability_names().collect();
            for &supertype in entry.supertypes {
                let parent = entries
                    .get(supertype)
                    .ok_or_else(|| Error::unknown_type(supertype))?;
                capabilities.extend(parent.capability_names());
            }
            types.insert(name, RegisteredType { entry, capabilities });
        }

        let mut by_name = BTreeMap::new();
        for entry in interceptors {
            if by_name.insert(entry.name, entry).is_some() {
                return Err(Error::DuplicateType {
                    type_name: entry.name.to_string(),
                });
            }
        }

        Ok(Self {
            types,
            interceptors: by_name,
        })
    }

    /// Every type name able to satisfy `descriptor`
    pub fn candidates_for(&self, descriptor: &CapabilityDescriptor) -> Result<BTreeSet<&'static str>> {
        match descriptor {
            CapabilityDescriptor::Concrete(name) => {
                let registered = self
                    .types
                    .get(name.as_str())
                    .ok_or_else(|| Error::unknown_type(name.as_str()))?;
                Ok(BTreeSet::from([registered.entry.name]))
            }
            CapabilityDescriptor::CapabilitySet(required) => Ok(self
                .types
                .values()
                .filter(|registered| registered.entry.is_instantiable())
                .filter(|registered| required.is_satisfied_by(&registered.capabilities))
                .map(|registered| registered.entry.name)
                .collect()),
            CapabilityDescriptor::Any => Ok(BTreeSet::from([ROOT_ENTRY.name])),
        }
    }

    /// Entry for a type name
    pub fn get(&self, name: &str) -> Option<&'static ComponentEntry> {
        self.types.get(name).map(|registered| registered.entry)
    }

    /// Entry for a type name, failing with [`Error::UnknownType`]
    pub fn require(&self, name: &str) -> Result<&'static ComponentEntry> {
        self.get(name).ok_or_else(|| Error::unknown_type(name))
    }

    /// Whether a type name is known
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Capabilities of a type including inherited ones
    pub fn effective_capabilities(&self, name: &str) -> Option<&BTreeSet<&'static str>> {
        self.types.get(name).map(|registered| &registered.capabilities)
    }

    /// Whether `name` is `ancestor` or lists it in its supertype chain
    ///
    /// Every known type descends from the root placeholder.
    pub fn is_subtype_of(&self, name: &str, ancestor: &str) -> bool {
        let Some(entry) = self.get(name) else {
            return false;
        };
        name == ancestor
            || ancestor == ROOT_TYPE_NAME
            || entry.supertypes.iter().any(|supertype| *supertype == ancestor)
    }

    /// Cast tables of a type in lookup order: own, then supertypes
    pub fn capability_tables(&self, entry: &'static ComponentEntry) -> Vec<&'static [Capability]> {
        let mut tables = vec![entry.capabilities];
        tables.extend(
            entry
                .supertypes
                .iter()
                .filter_map(|supertype| self.get(supertype))
                .map(|parent| parent.capabilities),
        );
        tables
    }

    /// Interceptor entry for a name, failing with [`Error::UnknownInterceptor`]
    pub fn interceptor(&self, name: &str) -> Result<&'static InterceptorEntry> {
        self.interceptors
            .get(name)
            .copied()
            .ok_or_else(|| Error::unknown_interceptor(name))
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    /// Number of registered types, the root placeholder included
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: the root placeholder is always registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// (name, description) of every registered type
    ///
    /// Useful for CLI help and diagnostics.
    pub fn list_components(&self) -> Vec<(&'static str, &'static str)> {
        self.types
            .values()
            .map(|registered| (registered.entry.name, registered.entry.description))
            .collect()
    }

    /// (name, description) of every registered interceptor
    pub fn list_interceptors(&self) -> Vec<(&'static str, &'static str)> {
        self.interceptors
            .values()
            .map(|entry| (entry.name, entry.description))
            .collect()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("interceptors", &self.interceptors.keys().collect::<Vec<_>>())
            .finish()
    }
}
