use thiserror::Error;

/// Fault raised inside a method handler. Converted to the protocol-level
/// internal error at the dispatch boundary; never aborts the serving process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
