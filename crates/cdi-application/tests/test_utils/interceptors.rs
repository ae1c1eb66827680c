//! Fixture interceptors

use std::collections::HashMap;
use std::sync::Mutex;

use cdi_application::{
    Error, Interceptor, InterceptorEntry, InvocationContext, Result, instantiate,
};
use serde_json::Value;

use super::record;

/// Records the call, then continues
#[derive(Default)]
pub struct LoggingInterceptor;

impl Interceptor for LoggingInterceptor {
    fn invoke(&self, invocation: &mut InvocationContext<'_>) -> Result<Value> {
        record(format!("logging:{}", invocation.method()));
        invocation.execute()
    }
}

/// Remembers results per method and arguments; vetoes repeated calls
#[derive(Default)]
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
        if let Some(hit) = cached {
            record("caching:hit");
            return Ok(hit);
        }

        record("caching:miss");
        let value = invocation.execute()?;
        self.cache
            .lock()
            .map_err(|_| Error::internal("cache lock poisoned"))?
            .insert(key, value.clone());
        Ok(value)
    }
}

/// Shifts the first argument by one before continuing
#[derive(Default)]
pub struct OffsetInterceptor;

impl Interceptor for OffsetInterceptor {
    fn invoke(&self, invocation: &mut InvocationContext<'_>) -> Result<Value> {
        let id: u64 = invocation.arguments().get(0)?;
        invocation.arguments_mut().set(0, id + 1)?;
        record(format!("offset:{id}->{}", id + 1));
        invocation.execute()
    }
}

/// Vetoes every call with a fixed answer
#[derive(Default)]
pub struct DenyInterceptor;

impl Interceptor for DenyInterceptor {
    fn invoke(&self, invocation: &mut InvocationContext<'_>) -> Result<Value> {
        record(format!("deny:{}", invocation.method()));
        Ok(Value::String("denied".to_string()))
    }
}

pub static LOGGING: InterceptorEntry = InterceptorEntry {
    name: "Logging",
    description: "Records every call",
    factory: instantiate::<LoggingInterceptor>,
};

pub static CACHING: InterceptorEntry = InterceptorEntry {
    name: "Caching",
    description: "Caches results by arguments",
    factory: instantiate::<CachingInterceptor>,
};

pub static OFFSET: InterceptorEntry = InterceptorEntry {
    name: "Offset",
    description: "Rewrites the first argument",
    factory: instantiate::<OffsetInterceptor>,
};

pub static DENY: InterceptorEntry = InterceptorEntry {
    name: "Deny",
    description: "Vetoes every call",
    factory: instantiate::<DenyInterceptor>,
};
