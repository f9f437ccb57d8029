//! Error types for payload handling

use thiserror::Error;

/// Core errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}
