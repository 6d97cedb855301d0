//! JSON-RPC polling client
//!
//! Provides the HTTP client that queries disponibility services and the
//! aggregation of their readings into a composite score. Per-service
//! failures are isolated: one unreachable service never aborts the rest of
//! the poll.

pub mod aggregate;

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::rpc::envelope::Response;

pub const CALL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned error {code}: {message}")]
    Rpc { code: i32, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// One successfully retrieved per-service reading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceReading {
    pub name: String,
    pub disponibility: f64,
}

pub struct RpcClient {
    http: reqwest::Client,
    next_id: i64,
}

impl RpcClient {
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, next_id: 1 })
    }

    pub async fn get_disponibility(
        &mut self,
        url: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<ServiceReading, ClientError> {
        let id = self.next_id;
        self.next_id += 1;

        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "get_disponibility",
            "params": [start_date, end_date],
        });

        let envelope: Response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = envelope.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = envelope.result.ok_or_else(|| {
            ClientError::MalformedResponse("response carries neither result nor error".to_string())
        })?;
        serde_json::from_value(result).map_err(|_| {
            ClientError::MalformedResponse("result is missing name or disponibility".to_string())
        })
    }
}
