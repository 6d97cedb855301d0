//! JSON-RPC protocol error taxonomy
//!
//! Every validation or dispatch failure maps to exactly one variant; the
//! `Display` rendering of a variant is the wire-level error message.

use serde_json::Value;
use thiserror::Error;

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const NOTIFICATION_UNSUPPORTED: i32 = -32089;
pub const BATCH_UNSUPPORTED: i32 = -32088;
pub const INTERNAL_ERROR: i32 = -32099;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RpcError {
    #[error("Parse error")]
    Parse,
    #[error("Invalid request: {reason}")]
    InvalidRequest { id: Option<Value>, reason: String },
    #[error("Method '{method}' not found")]
    UnknownMethod { id: Value, method: String },
    #[error("Invalid parameters: {reason}")]
    InvalidParams { id: Value, reason: String },
    #[error("JSON-RPC notifications not supported")]
    Notification,
    #[error("JSON-RPC batch requests not supported")]
    Batch,
    #[error("Internal server error: {message}")]
    Internal { id: Value, message: String },
}

impl RpcError {
    pub fn invalid_request(id: Option<Value>, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            id,
            reason: reason.into(),
        }
    }

    pub fn unknown_method(id: Value, method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            id,
            method: method.into(),
        }
    }

    pub fn invalid_params(id: Value, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            id,
            reason: reason.into(),
        }
    }

    pub fn internal(id: Value, message: impl Into<String>) -> Self {
        Self::Internal {
            id,
            message: message.into(),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Parse => PARSE_ERROR,
            Self::InvalidRequest { .. } => INVALID_REQUEST,
            Self::UnknownMethod { .. } => METHOD_NOT_FOUND,
            Self::InvalidParams { .. } => INVALID_PARAMS,
            Self::Notification => NOTIFICATION_UNSUPPORTED,
            Self::Batch => BATCH_UNSUPPORTED,
            Self::Internal { .. } => INTERNAL_ERROR,
        }
    }

    /// The best-known request id at the time of failure.
    pub fn id(&self) -> Option<&Value> {
        match self {
            Self::Parse | Self::Notification | Self::Batch => None,
            Self::InvalidRequest { id, .. } => id.as_ref(),
            Self::UnknownMethod { id, .. }
            | Self::InvalidParams { id, .. }
            | Self::Internal { id, .. } => Some(id),
        }
    }
}
