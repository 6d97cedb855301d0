//! JSON-RPC 2.0 protocol handling
//!
//! Provides request validation, method dispatch, response encoding, and the
//! protocol error taxonomy shared by the server façades and the client.

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod validate;
