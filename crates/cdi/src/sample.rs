//! Sample Components
//!
//! A small scenario linked into the `cdi` binary:
//!
//! - two [`Nameable`] greeters, so `<Nameable>` is ambiguous until bound
//! - [`Welcome`], which needs any `<Nameable>`
//! - [`DatabaseStore`], a [`RecordStore`] intercepted by `[Logging, Caching]`
//! - [`Report`], which reads records through whatever `<RecordStore>` it gets
//!
//! Every entry is submitted to the global manifest.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cdi_application::{
    Arguments, COMPONENTS, Capability, Component, ComponentEntry, Error, INTERCEPTORS,
    InjectionPoint, Interceptor, InterceptorEntry, InvocationContext, Proxy, ProxyEntry, Resolved,
    Result, construct, decorate, instantiate, view,
};
use linkme::distributed_slice;
use serde_json::Value;
use tracing::{debug, info};

// ============================================================================
// Greeters
// ============================================================================

/// Something with a greeting
pub trait Nameable: Send + Sync {
    /// The greeting
    fn name(&self) -> String;
}

/// Greets in English
#[derive(Debug, Default)]
pub struct EnglishGreeter;

impl Component for EnglishGreeter {}

impl Nameable for EnglishGreeter {
    fn name(&self) -> String {
        "Hello".to_string()
    }
}

#[distributed_slice(COMPONENTS)]
static ENGLISH_GREETER: ComponentEntry = ComponentEntry {
    capabilities: &[Capability {
        name: "Nameable",
        cast: |c| view(c, |g: Arc<EnglishGreeter>| g as Arc<dyn Nameable>),
    }],
    factory: Some(construct::<EnglishGreeter>),
    ..ComponentEntry::new("EnglishGreeter", "Greets in English")
};

/// Greets in French
#[derive(Debug, Default)]
pub struct FrenchGreeter;

impl Component for FrenchGreeter {}

impl Nameable for FrenchGreeter {
    fn name(&self) -> String {
        "Bonjour".to_string()
    }
}

#[distributed_slice(COMPONENTS)]
static FRENCH_GREETER: ComponentEntry = ComponentEntry {
    capabilities: &[Capability {
        name: "Nameable",
        cast: |c| view(c, |g: Arc<FrenchGreeter>| g as Arc<dyn Nameable>),
    }],
    factory: Some(construct::<FrenchGreeter>),
    ..ComponentEntry::new("FrenchGreeter", "Greets in French")
};

/// Greets through whichever `<Nameable>` was injected
#[derive(Default)]
pub struct Welcome {
    greeter: Option<Arc<dyn Nameable>>,
}

impl Welcome {
    /// Greeting for `guest`, in the injected greeter's words
    pub fn message(&self, guest: &str) -> Result<String> {
        let greeter = self
            .greeter
            .as_ref()
            .ok_or_else(|| Error::internal("Welcome has no greeter"))?;
        Ok(format!("{}, {guest}!", greeter.name()))
    }
}

impl Component for Welcome {
    fn inject(&mut self, slot: &str, value: Resolved) -> Result<()> {
        match slot {
            "greeter" => {
                self.greeter = Some(value.into_capability::<dyn Nameable>()?);
                Ok(())
            }
            other => Err(Error::unknown_slot("Welcome", other)),
        }
    }
}

#[distributed_slice(COMPONENTS)]
static WELCOME: ComponentEntry = ComponentEntry {
    factory: Some(construct::<Welcome>),
    injection_points: &[InjectionPoint::new("greeter", "<Nameable>")],
    ..ComponentEntry::new("Welcome", "Greets guests through any Nameable")
};

// ============================================================================
// Record store
// ============================================================================

/// Read access to stored records
pub trait RecordStore: Send + Sync {
    /// Fetch one record by id
    fn fetch(&self, id: u64) -> Result<String>;
}

/// Record store counting the lookups that reach it
#[derive(Debug, Default)]
pub struct DatabaseStore {
    lookups: AtomicUsize,
}

impl DatabaseStore {
    /// Lookups that reached the store
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Component for DatabaseStore {}

impl RecordStore for DatabaseStore {
    fn fetch(&self, id: u64) -> Result<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        debug!(id, "Database lookup");
        if id == 0 {
            return Err(Error::generic(format!("record {id} does not exist")));
        }
        Ok(format!("record #{id}"))
    }
}

/// Forwards [`RecordStore`] calls through the interceptor chain
#[derive(Debug, Clone)]
pub struct RecordStoreProxy(Proxy);

impl From<Proxy> for RecordStoreProxy {
    fn from(proxy: Proxy) -> Self {
        Self(proxy)
    }
}

impl RecordStoreProxy {
    /// The proxy every call goes through
    pub fn proxy(&self) -> &Proxy {
        &self.0
    }
}

impl Component for RecordStoreProxy {}

impl RecordStore for RecordStoreProxy {
    fn fetch(&self, id: u64) -> Result<String> {
        self.0
            .call("fetch", Arguments::new().with(id)?, |store: &DatabaseStore, args| {
                store.fetch(args.get(0)?)
            })
    }
}

#[distributed_slice(COMPONENTS)]
static DATABASE_STORE: ComponentEntry = ComponentEntry {
    capabilities: &[Capability {
        name: "RecordStore",
        cast: |c| view(c, |s: Arc<DatabaseStore>| s as Arc<dyn RecordStore>),
    }],
    factory: Some(construct::<DatabaseStore>),
    interceptors: &["Logging", "Caching"],
    proxy: Some(ProxyEntry {
        wrap: decorate::<RecordStoreProxy>,
        capabilities: &[Capability {
            name: "RecordStore",
            cast: |c| view(c, |p: Arc<RecordStoreProxy>| p as Arc<dyn RecordStore>),
        }],
    }),
    ..ComponentEntry::new("DatabaseStore", "Record store behind logging and caching")
};

/// Renders records read through any `<RecordStore>`
#[derive(Default)]
pub struct Report {
    store: Option<Arc<dyn RecordStore>>,
}

impl Report {
    /// One report line for record `id`
    pub fn line(&self, id: u64) -> Result<String> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| Error::internal("Report has no record store"))?;
        Ok(format!("{id}: {}", store.fetch(id)?))
    }
}

impl Component for Report {
    fn inject(&mut self, slot: &str, value: Resolved) -> Result<()> {
        match slot {
            "store" => {
                self.store = Some(value.into_capability::<dyn RecordStore>()?);
                Ok(())
            }
            other => Err(Error::unknown_slot("Report", other)),
        }
    }
}

#[distributed_slice(COMPONENTS)]
static REPORT: ComponentEntry = ComponentEntry {
    factory: Some(construct::<Report>),
    injection_points: &[InjectionPoint::new("store", "<RecordStore>")],
    ..ComponentEntry::new("Report", "Reads records through any RecordStore")
};

// ============================================================================
// Interceptors
// ============================================================================

/// Logs every call and its outcome
#[derive(Debug, Default)]
pub struct LoggingInterceptor;

impl Interceptor for LoggingInterceptor {
    fn invoke(&self, invocation: &mut InvocationContext<'_>) -> Result<Value> {
        let method = invocation.method().to_string();
        info!(method = %method, arguments = %invocation.arguments().key(), "Call entered");
        let result = invocation.execute();
        match &result {
            Ok(value) => info!(method = %method, %value, "Call returned"),
            Err(e) => info!(method = %method, error = %e, "Call failed"),
        }
        result
    }
}

#[distributed_slice(INTERCEPTORS)]
static LOGGING: InterceptorEntry = InterceptorEntry {
    name: "Logging",
    description: "Logs calls and their outcome",
    factory: instantiate::<LoggingInterceptor>,
};

/// Answers repeated calls from memory without continuing the chain
#[derive(Debug, Default)]
pub struct CachingInterceptor {
    cache: Mutex<HashMap<String, Value>>,
}

impl Interceptor for CachingInterceptor {
    fn invoke(&self, invocation: &mut InvocationContext<'_>) -> Result<Value> {
        let key = format!("{}{}", invocation.method(), invocation.arguments().key());
        let cached = self
            .cache
            .lock()
            .map_err(|_| Error::internal("cache lock poisoned"))?
            .get(&key)
            .cloned();
        if let Some(value) = cached {
            debug!(key = %key, "Cache hit");
            return Ok(value);
        }

        let value = invocation.execute()?;
        self.cache
            .lock()
            .map_err(|_| Error::internal("cache lock poisoned"))?
            .insert(key, value.clone());
        Ok(value)
    }
}

#[distributed_slice(INTERCEPTORS)]
static CACHING: InterceptorEntry = InterceptorEntry {
    name: "Caching",
    description: "Caches results by method and arguments",
    factory: instantiate::<CachingInterceptor>,
};
