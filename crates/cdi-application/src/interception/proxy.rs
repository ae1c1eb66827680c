//! Interception Proxy
//!
//! A [`Proxy`] pairs a real target with the interceptor chain of its type.
//! Per-type decorators hold a proxy, implement the same capability traits as
//! the target and forward each method through [`Proxy::call`]:
//!
//! ```ignore
//! #[derive(Clone)]
//! struct RecordStoreProxy(Proxy);
//!
//! impl RecordStore for RecordStoreProxy {
//!     fn fetch(&self, id: u64) -> Result<String> {
//!         self.0.call("fetch", Arguments::new().with(id)?, |store: &DatabaseStore, args| {
//!             store.fetch(args.get(0)?)
//!         })
//!     }
//! }
//! ```

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use cdi_domain::{Component, Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use super::arguments::Arguments;
use super::context::InvocationContext;
use super::interceptor::InterceptorChain;

/// Forwarding shim between a decorator and its real target
///
/// Holds no business state; every call builds a fresh
/// [`InvocationContext`] with its cursor at 0.
#[derive(Clone)]
pub struct Proxy {
    type_name: &'static str,
    target: Arc<dyn Component>,
    chain: Arc<InterceptorChain>,
}

impl Proxy {
    /// Proxy over `target` with the ordered `chain`
    pub fn new(type_name: &'static str, target: Arc<dyn Component>, chain: Arc<InterceptorChain>) -> Self {
        Self {
            type_name,
            target,
            chain,
        }
    }

    /// Registry name of the target type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The real instance
    pub fn target(&self) -> &Arc<dyn Component> {
        &self.target
    }

    /// The interceptors every call passes through
    pub fn chain(&self) -> &Arc<InterceptorChain> {
        &self.chain
    }

    /// Run one call through the chain with an untyped real method
    pub fn invoke(
        &self,
        method: &str,
        arguments: Arguments,
        real: &dyn Fn(&Arguments) -> Result<Value>,
    ) -> Result<Value> {
        let mut invocation =
            InvocationContext::new(self.target.as_ref(), method, arguments, &self.chain, real);
        let result = invocation.execute();
        invocation.finish(&result);
        trace!(
            target_type = self.type_name,
            method,
            state = %invocation.state(),
            "Intercepted call finished"
        );
        result
    }

    /// Run one call through the chain
    ///
    /// `real` receives the target as its concrete type `T` together with the
    /// arguments as left by the interceptors. Interceptors see its return
    /// value encoded as JSON. When that value comes back unchanged the caller
    /// gets the original `R`, exactly as a direct call would return it; a
    /// value supplied by an interceptor instead is decoded into `R`.
    pub fn call<T, R, F>(&self, method: &str, arguments: Arguments, real: F) -> Result<R>
    where
        T: Component,
        R: Serialize + DeserializeOwned,
        F: Fn(&T, &Arguments) -> Result<R>,
    {
        let target = self
            .target
            .downcast_ref::<T>()
            .ok_or_else(|| Error::capability_mismatch(self.type_name, std::any::type_name::<T>()))?;

        let produced: RefCell<Option<(R, Value)>> = RefCell::new(None);
        let returned = {
            let dispatch = |arguments: &Arguments| -> Result<Value> {
                let value = real(target, arguments)?;
                let encoded = serde_json::to_value(&value).map_err(|e| {
                    Error::argument_with_source(format!("'{method}' returned a value that cannot be encoded"), e)
                })?;
                *produced.borrow_mut() = Some((value, encoded.clone()));
                Ok(encoded)
            };
            self.invoke(method, arguments, &dispatch)?
        };

        if let Some((value, encoded)) = produced.into_inner()
            && encoded == returned
        {
            return Ok(value);
        }
        serde_json::from_value(returned).map_err(|e| {
            Error::argument_with_source(format!("'{method}' result has an unexpected shape"), e)
        })
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("type_name", &self.type_name)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}
