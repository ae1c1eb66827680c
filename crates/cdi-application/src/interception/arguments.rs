//! Invocation Arguments
//!
//! Arguments travel through the interceptor chain as JSON values so generic
//! interceptors (logging, caching, validation) can inspect and rewrite them
//! without knowing the intercepted method's Rust signature.

use cdi_domain::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Positional arguments of one intercepted call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Vec<Value>);

impl Arguments {
    /// No arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments from already-encoded values
    pub fn from_values(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Append an argument
    pub fn with<T: Serialize>(mut self, value: T) -> Result<Self> {
        self.push(value)?;
        Ok(self)
    }

    /// Append an argument in place
    pub fn push<T: Serialize>(&mut self, value: T) -> Result<()> {
        let encoded = serde_json::to_value(value)
            .map_err(|e| Error::argument_with_source("argument cannot be encoded", e))?;
        self.0.push(encoded);
        Ok(())
    }

    /// Decode the argument at `index`
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
        let value = self
            .0
            .get(index)
            .ok_or_else(|| Error::argument(format!("missing argument at position {index}")))?;
        serde_json::from_value(value.clone()).map_err(|e| {
            Error::argument_with_source(format!("argument {index} has an unexpected shape"), e)
        })
    }

    /// Replace the argument at `index`
    pub fn set<T: Serialize>(&mut self, index: usize, value: T) -> Result<()> {
        let slot = self
            .0
            .get_mut(index)
            .ok_or_else(|| Error::argument(format!("missing argument at position {index}")))?;
        *slot = serde_json::to_value(value)
            .map_err(|e| Error::argument_with_source("argument cannot be encoded", e))?;
        Ok(())
    }

    /// Raw encoded values
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the call has no arguments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stable textual key of the argument list, e.g. for result caches
    pub fn key(&self) -> String {
        Value::Array(self.0.clone()).to_string()
    }
}
