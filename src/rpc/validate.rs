//! JSON-RPC 2.0 request validation
//!
//! Provides the ordered, short-circuiting envelope and parameter checks that
//! turn raw request bytes into a call descriptor the dispatcher trusts
//! unconditionally. Every failure returns a fully formed protocol error
//! carrying the best-known request id.

use serde_json::{Map, Value};

use crate::rpc::dispatch::{MethodRegistry, ParamShape};
use crate::rpc::error::RpcError;

/// A fully validated request, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    pub id: Value,
    pub method: String,
    pub params: CallParams,
}

/// Call parameters resolved to their underlying values, independent of the
/// positional or named shape they arrived in.
#[derive(Debug, Clone, PartialEq)]
pub enum CallParams {
    None,
    DateRange {
        start_date: String,
        end_date: String,
    },
}

pub fn validate_request(
    raw: &[u8],
    registry: &MethodRegistry,
) -> Result<CallDescriptor, RpcError> {
    let value: Value = serde_json::from_slice(raw).map_err(|_| RpcError::Parse)?;

    if value.is_array() {
        return Err(RpcError::Batch);
    }

    let Some(object) = value.as_object() else {
        return Err(RpcError::invalid_request(
            None,
            "request root is not an object",
        ));
    };

    if !object.contains_key("jsonrpc") || !object.contains_key("method") {
        return Err(RpcError::invalid_request(
            None,
            "missing mandatory attributes",
        ));
    }

    // Requests without an id are notifications, which are rejected outright.
    let Some(id) = object.get("id") else {
        return Err(RpcError::Notification);
    };
    let id = id.clone();

    let version = &object["jsonrpc"];
    if version.as_str() != Some("2.0") {
        let shown = version
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| version.to_string());
        return Err(RpcError::invalid_request(
            Some(id),
            format!("invalid version number: {shown}"),
        ));
    }

    let method = &object["method"];
    let Some(method) = method.as_str() else {
        return Err(RpcError::unknown_method(id, method.to_string()));
    };
    let Some(entry) = registry.entry(method) else {
        return Err(RpcError::unknown_method(id, method));
    };

    let params = validate_params(object, method, entry.shape, &id)?;

    Ok(CallDescriptor {
        id,
        method: method.to_string(),
        params,
    })
}

fn validate_params(
    object: &Map<String, Value>,
    method: &str,
    shape: ParamShape,
    id: &Value,
) -> Result<CallParams, RpcError> {
    match shape {
        ParamShape::NoParams => {
            if object.contains_key("params") {
                return Err(RpcError::invalid_params(
                    id.clone(),
                    format!("no params expected for \"{method}\""),
                ));
            }
            Ok(CallParams::None)
        }
        ParamShape::DateRange => {
            let Some(params) = object.get("params") else {
                return Err(RpcError::invalid_params(
                    id.clone(),
                    format!("params are required for \"{method}\""),
                ));
            };
            validate_date_range(params, id)
        }
    }
}

fn validate_date_range(params: &Value, id: &Value) -> Result<CallParams, RpcError> {
    match params {
        Value::Array(items) => {
            if items.len() != 2 {
                return Err(RpcError::invalid_params(
                    id.clone(),
                    "array params must contain two values",
                ));
            }
            match (items[0].as_str(), items[1].as_str()) {
                (Some(start_date), Some(end_date)) => Ok(CallParams::DateRange {
                    start_date: start_date.to_string(),
                    end_date: end_date.to_string(),
                }),
                _ => Err(RpcError::invalid_params(
                    id.clone(),
                    "array params must be string values",
                )),
            }
        }
        Value::Object(map) => {
            let (Some(start), Some(end)) = (map.get("start_date"), map.get("end_date")) else {
                return Err(RpcError::invalid_params(
                    id.clone(),
                    "missing key params \"start_date\" or \"end_date\"",
                ));
            };
            match (start.as_str(), end.as_str()) {
                (Some(start_date), Some(end_date)) => Ok(CallParams::DateRange {
                    start_date: start_date.to_string(),
                    end_date: end_date.to_string(),
                }),
                _ => Err(RpcError::invalid_params(
                    id.clone(),
                    "object params must be string values",
                )),
            }
        }
        _ => Err(RpcError::invalid_params(
            id.clone(),
            "params must be an array or object",
        )),
    }
}
