use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single cart operation.
///
/// The store never surfaces these to callers directly; they are reduced to
/// their display string in [`CartState::error`](super::CartState::error).
#[derive(Debug, Error)]
pub enum CartError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("quantity must be greater than 0")]
    InvalidQuantity,

    #[error("quantity {requested} exceeds available stock of {available}")]
    ExceedsStock { requested: u32, available: u32 },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} ({status})")]
    Api { status: StatusCode, message: String },

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("token storage: {0}")]
    TokenStorage(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CartError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CartError::Api { status, .. } => Some(*status),
            CartError::Http(err) => err.status(),
            _ => None,
        }
    }
}
