//! Wrappable operations and their identities.

use std::fmt;

use async_trait::async_trait;

use super::args::CallArgs;
use crate::interfaces::Result;

/// An async store-backed operation that advice can wrap.
///
/// Wrappers implement `Operation` themselves with the same input and output
/// types, so they stack without changing the call signature.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Positional arguments, rendered into history by `CallArgs`.
    type Input: CallArgs + Send + 'static;
    /// Result, rendered into history by `Display`.
    type Output: fmt::Display + Send + 'static;

    async fn call(&self, input: Self::Input) -> Result<Self::Output>;
}

/// Stable name of a wrapped operation, e.g. `Cache.store`.
///
/// The name is the counter key; history lives under `{name}:inputs` and
/// `{name}:outputs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationId {
    name: String,
    inputs_key: String,
    outputs_key: String,
}

impl OperationId {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            inputs_key: format!("{}:inputs", name),
            outputs_key: format!("{}:outputs", name),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counter_key(&self) -> &str {
        &self.name
    }

    pub fn inputs_key(&self) -> &str {
        &self.inputs_key
    }

    pub fn outputs_key(&self) -> &str {
        &self.outputs_key
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for OperationId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
