//! Interceptor Port
//!
//! An interceptor receives the [`InvocationContext`] of every call made
//! through a proxy of the type it is declared on. It continues the chain by
//! calling [`InvocationContext::execute`], or vetoes the call by returning
//! without doing so.

use std::fmt;
use std::sync::Arc;

use cdi_domain::Result;
use serde_json::Value;

use super::context::InvocationContext;

/// Cross-cutting behaviour run around intercepted methods
///
/// One instance is shared by every call on the target type, so
/// implementations keep per-call data on the stack and shared data behind
/// their own synchronization.
///
/// ## Example
///
/// ```rust
/// use cdi_application::{Interceptor, InvocationContext, Result};
/// use serde_json::Value;
///
/// struct Tracing;
///
/// impl Interceptor for Tracing {
///     fn invoke(&self, invocation: &mut InvocationContext<'_>) -> Result<Value> {
///         println!("calling {}", invocation.method());
///         invocation.execute()
///     }
/// }
/// ```
pub trait Interceptor: Send + Sync {
    /// Run this step of the chain
    fn invoke(&self, invocation: &mut InvocationContext<'_>) -> Result<Value>;
}

/// Ordered interceptors of one target type
///
/// Fixed once built; the injector builds one chain per intercepted type and
/// shares it between every proxy of that type.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    names: Vec<String>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Empty chain; calls go straight to the real method
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, interceptor: Arc<dyn Interceptor>) -> Self {
        self.push(name, interceptor);
        self
    }

    /// Append an interceptor in place
    pub fn push(&mut self, name: impl Into<String>, interceptor: Arc<dyn Interceptor>) {
        self.names.push(name.into());
        self.interceptors.push(interceptor);
    }

    /// Interceptor at `position`
    pub fn get(&self, position: usize) -> Option<&Arc<dyn Interceptor>> {
        self.interceptors.get(position)
    }

    /// Name of the interceptor at `position`
    pub fn name(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    /// Interceptor names in chain order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the chain has no interceptors
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.names).finish()
    }
}
