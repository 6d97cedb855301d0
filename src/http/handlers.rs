//! Axum HTTP handlers for the web server
//!
//! Provides the per-façade JSON-RPC endpoint and general metadata endpoints.
//! Protocol outcomes, success or failure, always answer HTTP 200; errors are
//! communicated inside the JSON-RPC envelope.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::domain::facade::Facade;
use crate::rpc::envelope::Response;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FacadeInfo {
    pub route: String,
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub facades: Vec<FacadeInfo>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery(State(state): State<AppState>) -> Json<DiscoveryResponse> {
    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        facades: state
            .facades
            .iter()
            .map(|facade| FacadeInfo {
                route: facade.route().to_string(),
                service: facade.name().to_string(),
            })
            .collect(),
    })
}

pub fn serve_rpc(facade: &Facade, body: &[u8]) -> Json<Response> {
    Json(facade.handle(body))
}
