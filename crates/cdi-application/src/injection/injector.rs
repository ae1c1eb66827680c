//! Injector
//!
//! The resolution engine and the explicit lifecycle hook. Every managed
//! object is built by [`Injector::create`]:
//!
//! 1. construct the type with its no-argument factory;
//! 2. resolve each declared injection point and assign it to its slot;
//! 3. wrap the instance in its proxy decorator when the type declares
//!    interceptors and is not excluded from interception.
//!
//! Resolution of a point picks exactly one implementation: a binding when
//! one exists, otherwise the single registry candidate. Zero candidates and
//! several candidates are both errors; the injector never guesses.

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, RwLock};

use cdi_domain::{CapabilityDescriptor, Component, Error, InjectionPoint, Resolved, Result};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::debug;

use super::bindings::BindingTable;
use crate::interception::{InterceptorChain, Proxy};
use crate::registry::{ComponentEntry, Scope, TypeRegistry};

static SHARED: OnceCell<Arc<Injector>> = OnceCell::new();

/// Resolves injection points and builds wired, possibly proxied instances
pub struct Injector {
    registry: Arc<TypeRegistry>,
    bindings: RwLock<BindingTable>,
    excluded: RwLock<HashSet<String>>,
    chains: DashMap<&'static str, Arc<InterceptorChain>>,
    singletons: DashMap<&'static str, Resolved>,
}

impl Injector {
    /// Injector over an explicit registry with no bindings
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            bindings: RwLock::new(BindingTable::new()),
            excluded: RwLock::new(HashSet::new()),
            chains: DashMap::new(),
            singletons: DashMap::new(),
        }
    }

    /// Injector over the process-wide manifest
    pub fn global() -> Result<Self> {
        TypeRegistry::global().map(Self::new)
    }

    /// The process-wide injector, created on first use
    pub fn shared() -> Result<Arc<Self>> {
        SHARED
            .get_or_try_init(|| Self::global().map(Arc::new))
            .map(Arc::clone)
    }

    /// The registry this injector resolves against
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Bindings
    // ------------------------------------------------------------------

    /// Bind a requested descriptor to one implementation type
    ///
    /// Fails when the descriptor is malformed or the implementation type is
    /// unknown. A later binding for the same descriptor replaces this one.
    pub fn bind(&self, requested: &str, implementation: &str) -> Result<()> {
        let descriptor = CapabilityDescriptor::parse(requested)?;
        let entry = self.registry.require(implementation)?;
        let replaced = self.write_bindings()?.bind(&descriptor, entry.name);
        debug!(
            requested = %descriptor,
            implementation = entry.name,
            replaced = replaced.as_deref(),
            "Binding registered"
        );
        Ok(())
    }

    /// Remove the binding of a descriptor, returning whether one existed
    pub fn unbind(&self, requested: &str) -> Result<bool> {
        let descriptor = CapabilityDescriptor::parse(requested)?;
        Ok(self.write_bindings()?.unbind(&descriptor).is_some())
    }

    /// Implementation currently bound to a descriptor
    pub fn binding(&self, requested: &str) -> Result<Option<String>> {
        let descriptor = CapabilityDescriptor::parse(requested)?;
        Ok(self.read_bindings()?.lookup(&descriptor).map(str::to_string))
    }

    /// Drop every binding
    pub fn clear_bindings(&self) -> Result<()> {
        self.write_bindings()?.clear();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Exclusion filter
    // ------------------------------------------------------------------

    /// Never wrap instances of `type_name` in a proxy
    ///
    /// Excluded instances are still injected; calls reach them directly.
    pub fn exclude_from_interception(&self, type_name: &str) -> Result<()> {
        let entry = self.registry.require(type_name)?;
        self.excluded
            .write()
            .map_err(|_| Error::internal("interception exclusion lock poisoned"))?
            .insert(entry.name.to_string());
        debug!(type_name = entry.name, "Type excluded from interception");
        Ok(())
    }

    /// Remove `type_name` from the exclusion filter
    pub fn include_in_interception(&self, type_name: &str) -> Result<bool> {
        Ok(self
            .excluded
            .write()
            .map_err(|_| Error::internal("interception exclusion lock poisoned"))?
            .remove(type_name))
    }

    /// Whether `type_name` is exempt from interception
    pub fn is_excluded(&self, type_name: &str) -> Result<bool> {
        Ok(self
            .excluded
            .read()
            .map_err(|_| Error::internal("interception exclusion lock poisoned"))?
            .contains(type_name))
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolve a declared need, optionally narrowed to one exact type
    pub fn resolve(&self, descriptor: &str, type_override: Option<&str>) -> Result<Resolved> {
        let declared = CapabilityDescriptor::parse(descriptor)?;
        let entry = self.select(&declared, type_override)?;
        self.instantiate(entry, &mut Vec::new())
    }

    /// Resolve a declared need and view it as capability `C`
    pub fn resolve_as<C>(&self, descriptor: &str) -> Result<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.resolve(descriptor, None)?.into_capability::<C>()
    }

    /// Resolve one injection point
    pub fn resolve_point(&self, point: &InjectionPoint) -> Result<Resolved> {
        self.resolve_point_in(point, &mut Vec::new())
    }

    /// Pick the implementation type for a need without creating it
    ///
    /// A binding makes the bound type the sole candidate. Otherwise the
    /// registry must report exactly one candidate for the effective
    /// descriptor.
    pub fn select(
        &self,
        declared: &CapabilityDescriptor,
        type_override: Option<&str>,
    ) -> Result<&'static ComponentEntry> {
        let effective = declared.narrowed(type_override)?;
        self.select_narrowed(declared, type_override, &effective)
    }

    fn select_narrowed(
        &self,
        declared: &CapabilityDescriptor,
        type_override: Option<&str>,
        effective: &CapabilityDescriptor,
    ) -> Result<&'static ComponentEntry> {
        let bound = self
            .read_bindings()?
            .lookup_point(declared, type_override)
            .map(str::to_string);
        if let Some(bound) = bound {
            debug!(requested = %declared, implementation = %bound, "Resolved through binding");
            return self.registry.require(&bound);
        }

        let candidates = self.registry.candidates_for(effective)?;
        self.single_candidate(effective, candidates)
    }

    fn single_candidate(
        &self,
        effective: &CapabilityDescriptor,
        candidates: BTreeSet<&'static str>,
    ) -> Result<&'static ComponentEntry> {
        if candidates.len() > 1 {
            return Err(Error::ambiguous(effective.to_string(), candidates));
        }
        let Some(&only) = candidates.first() else {
            return Err(Error::no_implementation(
                effective.to_string(),
                "no registered instantiable type provides every requested capability",
            ));
        };
        debug!(requested = %effective, implementation = only, "Resolved through registry");
        self.registry.require(only)
    }

    fn resolve_point_in(
        &self,
        point: &InjectionPoint,
        stack: &mut Vec<&'static str>,
    ) -> Result<Resolved> {
        let declared = point.declared()?;
        let effective = point.effective()?;
        let entry = self.select_narrowed(&declared, point.type_override, &effective)?;
        self.instantiate(entry, stack)
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Build a fully wired instance of `type_name`
    pub fn create(&self, type_name: &str) -> Result<Resolved> {
        let entry = self.registry.require(type_name)?;
        self.instantiate(entry, &mut Vec::new())
    }

    /// Build `type_name` and downcast it to its Rust type
    ///
    /// Proxied types downcast to their decorator, not to the target.
    pub fn create_as<T: Component>(&self, type_name: &str) -> Result<Arc<T>> {
        self.create(type_name)?.downcast::<T>()
    }

    fn instantiate(
        &self,
        entry: &'static ComponentEntry,
        stack: &mut Vec<&'static str>,
    ) -> Result<Resolved> {
        if entry.scope == Scope::Singleton
            && let Some(existing) = self.singletons.get(entry.name)
        {
            return Ok(existing.clone());
        }

        if stack.contains(&entry.name) {
            let mut path: Vec<String> = stack.iter().map(ToString::to_string).collect();
            path.push(entry.name.to_string());
            return Err(Error::CircularDependency { path });
        }

        stack.push(entry.name);
        let built = self.build(entry, stack);
        stack.pop();
        let resolved = built?;

        if entry.scope == Scope::Singleton {
            return Ok(self
                .singletons
                .entry(entry.name)
                .or_insert(resolved)
                .clone());
        }
        Ok(resolved)
    }

    fn build(&self, entry: &'static ComponentEntry, stack: &mut Vec<&'static str>) -> Result<Resolved> {
        let factory = entry.factory.ok_or_else(|| {
            Error::no_implementation(entry.name, "type is abstract and has no factory")
        })?;

        let mut instance = factory();
        for point in entry.injection_points {
            let value = self.resolve_point_in(point, stack)?;
            debug!(
                type_name = entry.name,
                slot = point.slot,
                implementation = value.type_name(),
                "Injecting dependency"
            );
            instance.inject(point.slot, value)?;
        }
        let instance: Arc<dyn Component> = Arc::from(instance);

        if !entry.is_intercepted() {
            return Ok(self.plain(entry, instance));
        }
        if self.is_excluded(entry.name)? {
            debug!(type_name = entry.name, "Interception skipped for excluded type");
            return Ok(self.plain(entry, instance));
        }
        let chain = self.chain_for(entry.name)?;
        self.wrap(entry.name, instance, chain)
    }

    fn plain(&self, entry: &'static ComponentEntry, instance: Arc<dyn Component>) -> Resolved {
        Resolved::new(entry.name, instance, self.registry.capability_tables(entry), false)
    }

    // ------------------------------------------------------------------
    // Interception
    // ------------------------------------------------------------------

    /// Interceptor chain declared by `type_name`
    ///
    /// Interceptors are instantiated once per target type; later calls
    /// return the cached chain.
    pub fn chain_for(&self, type_name: &str) -> Result<Arc<InterceptorChain>> {
        let entry = self.registry.require(type_name)?;
        if let Some(chain) = self.chains.get(entry.name) {
            return Ok(Arc::clone(&chain));
        }

        let mut chain = InterceptorChain::new();
        for &name in entry.interceptors {
            let interceptor = self.registry.interceptor(name)?;
            chain.push(name, (interceptor.factory)());
        }
        debug!(type_name = entry.name, chain = ?chain, "Interceptor chain built");

        Ok(Arc::clone(
            &self.chains.entry(entry.name).or_insert_with(|| Arc::new(chain)),
        ))
    }

    /// Wrap a wired instance of `type_name` in its proxy decorator
    pub fn wrap(
        &self,
        type_name: &str,
        target: Arc<dyn Component>,
        chain: Arc<InterceptorChain>,
    ) -> Result<Resolved> {
        let entry = self.registry.require(type_name)?;
        let decorator = entry.proxy.ok_or_else(|| Error::MissingProxy {
            type_name: entry.name.to_string(),
        })?;
        let proxy = Proxy::new(entry.name, target, chain);
        Ok(Resolved::new(
            entry.name,
            (decorator.wrap)(proxy),
            vec![decorator.capabilities],
            true,
        ))
    }

    fn read_bindings(&self) -> Result<std::sync::RwLockReadGuard<'_, BindingTable>> {
        self.bindings
            .read()
            .map_err(|_| Error::internal("binding table lock poisoned"))
    }

    fn write_bindings(&self) -> Result<std::sync::RwLockWriteGuard<'_, BindingTable>> {
        self.bindings
            .write()
            .map_err(|_| Error::internal("binding table lock poisoned"))
    }
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("registry", &self.registry)
            .field("bindings", &self.bindings)
            .field("excluded", &self.excluded)
            .finish_non_exhaustive()
    }
}
