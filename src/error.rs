// Typed errors with thiserror. Surface meaningful messages to JS.
// The search itself never fails; these cover config and input decoding.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug)]
pub enum ZoomError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid viewBox {value:?}: {reason}")]
    InvalidViewBox { value: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ZoomError {
    fn from(err: serde_json::Error) -> Self {
        ZoomError::Serialization(err.to_string())
    }
}
