//! Method registry and dispatch
//!
//! Provides the explicit method-name to handler mapping each façade builds
//! once at construction, replacing any by-name reflection lookup. Dispatch
//! trusts the validated call descriptor; disagreement between the two is a
//! programming fault surfaced as an internal error, not protocol noise.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::AppError;
use crate::rpc::error::RpcError;
use crate::rpc::validate::{CallDescriptor, CallParams};

/// The parameter shape a method declares for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// No `params` key may be present.
    NoParams,
    /// Exactly two strings, positional or named `start_date`/`end_date`.
    DateRange,
}

pub type HandlerFn = Arc<dyn Fn(&CallParams) -> Result<Value, AppError> + Send + Sync>;

pub struct MethodEntry {
    pub shape: ParamShape,
    handler: HandlerFn,
}

/// The exported-method whitelist of one façade.
#[derive(Default)]
pub struct MethodRegistry {
    methods: HashMap<String, MethodEntry>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, shape: ParamShape, handler: HandlerFn) {
        self.methods
            .insert(name.into(), MethodEntry { shape, handler });
    }

    pub fn entry(&self, name: &str) -> Option<&MethodEntry> {
        self.methods.get(name)
    }
}

/// Invoke the handler bound to an already-validated call.
pub fn dispatch(registry: &MethodRegistry, call: &CallDescriptor) -> Result<Value, RpcError> {
    let entry = registry.entry(&call.method).ok_or_else(|| {
        RpcError::internal(
            call.id.clone(),
            format!("dispatch on unregistered method '{}'", call.method),
        )
    })?;

    (entry.handler)(&call.params)
        .map_err(|fault| RpcError::internal(call.id.clone(), fault.to_string()))
}
