//! Invocation Context
//!
//! One intercepted call: the real target, the method name, its arguments and
//! a cursor into the interceptor chain. Each [`execute`](InvocationContext::execute)
//! runs the next step; once the cursor reaches the end the real method runs.
//! A context is single-use: after any step has returned, `execute` fails, so
//! an outer interceptor cannot run the real method past an inner veto.
//!
//! ```text
//! Pending ──execute──▶ Running(1) ──execute──▶ ... ──execute──▶ Completed
//!                          │                                      (or Failed)
//!                          └── interceptor returns without execute ──▶ Vetoed
//! ```

use std::fmt;

use cdi_domain::{Component, Error, Result};
use serde_json::Value;
use tracing::{trace, warn};

use super::arguments::Arguments;
use super::interceptor::InterceptorChain;

/// Dispatches the real method on the target
pub type RealMethod<'a> = &'a dyn Fn(&Arguments) -> Result<Value>;

/// Progress of one call through its chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    /// Built, nothing executed yet
    Pending,
    /// Interceptor at this 1-based position is running
    Running(usize),
    /// The real method ran and returned a value
    Completed,
    /// An interceptor returned without continuing the chain
    Vetoed,
    /// An interceptor or the real method failed
    Failed,
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Running(step) => write!(f, "running({step})"),
            Self::Completed => f.write_str("completed"),
            Self::Vetoed => f.write_str("vetoed"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Single-use record of one call through an interceptor chain
pub struct InvocationContext<'a> {
    target: &'a dyn Component,
    method: &'a str,
    arguments: Arguments,
    chain: &'a InterceptorChain,
    real: RealMethod<'a>,
    cursor: usize,
    dispatched: bool,
    returned: bool,
    state: InvocationState,
}

impl<'a> InvocationContext<'a> {
    /// Context with its cursor at the start of `chain`
    pub fn new(
        target: &'a dyn Component,
        method: &'a str,
        arguments: Arguments,
        chain: &'a InterceptorChain,
        real: RealMethod<'a>,
    ) -> Self {
        Self {
            target,
            method,
            arguments,
            chain,
            real,
            cursor: 0,
            dispatched: false,
            returned: false,
            state: InvocationState::Pending,
        }
    }

    /// Run the next step of the chain
    ///
    /// Invokes the interceptor under the cursor after advancing it, or the
    /// real method once every interceptor has been entered. Fails with
    /// [`Error::InvocationAlreadyCompleted`] once the real method ran or any
    /// step of the chain has returned, vetoed or not.
    pub fn execute(&mut self) -> Result<Value> {
        if self.dispatched || self.returned {
            warn!(
                method = self.method,
                dispatched = self.dispatched,
                "Invocation continued after its chain returned"
            );
            return Err(Error::invocation_completed(self.method));
        }

        let chain = self.chain;
        let result = match chain.get(self.cursor) {
            Some(interceptor) => {
                let position = self.cursor;
                self.cursor += 1;
                self.state = InvocationState::Running(self.cursor);
                trace!(
                    method = self.method,
                    interceptor = chain.name(position).unwrap_or_default(),
                    step = self.cursor,
                    "Entering interceptor"
                );
                interceptor.invoke(self)
            }
            None => {
                self.dispatched = true;
                trace!(method = self.method, "Dispatching real method");
                let real = self.real;
                let result = real(&self.arguments);
                if result.is_ok() {
                    self.state = InvocationState::Completed;
                }
                result
            }
        };

        self.returned = true;
        if result.is_err() {
            self.state = InvocationState::Failed;
        }
        result
    }

    /// Settle the final state after the outermost `execute` returned
    ///
    /// A successful result without a dispatched real method means some
    /// interceptor vetoed the call.
    pub fn finish(&mut self, result: &Result<Value>) {
        self.state = match result {
            Err(_) => InvocationState::Failed,
            Ok(_) if self.dispatched => InvocationState::Completed,
            Ok(_) => InvocationState::Vetoed,
        };
    }

    /// The real instance, never the proxy
    pub fn target(&self) -> &dyn Component {
        self.target
    }

    /// The real instance as its concrete type
    pub fn target_as<T: Component>(&self) -> Option<&T> {
        self.target.downcast_ref::<T>()
    }

    /// Name of the intercepted method
    pub fn method(&self) -> &str {
        self.method
    }

    /// Current arguments
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Arguments, for interceptors that rewrite them before continuing
    pub fn arguments_mut(&mut self) -> &mut Arguments {
        &mut self.arguments
    }

    /// Index of the next interceptor to run
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of interceptors in the chain
    pub fn chain_len(&self) -> usize {
        self.chain.len()
    }

    /// Whether the real method has been dispatched
    pub fn is_dispatched(&self) -> bool {
        self.dispatched
    }

    /// Current state
    pub fn state(&self) -> InvocationState {
        self.state
    }
}

impl fmt::Debug for InvocationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("method", &self.method)
            .field("arguments", &self.arguments)
            .field("chain", &self.chain)
            .field("cursor", &self.cursor)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
