//! HTTP transport layer for the disponibility services
//!
//! Provides the per-façade JSON-RPC listeners and other endpoints.

pub mod handlers;
