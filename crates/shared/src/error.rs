use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure taxonomy at the remote-store boundary. Nothing here is fatal
/// to the process; callers decide whether to recover (fetch), surface
/// (insert), or only log (auth fallback).
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum StoreError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("remote service returned {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }
}
