//! Control surface errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hc_03_replication::ReplicationError;
use thiserror::Error;

/// Errors returned by control surface handlers.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Invalid peer address: {0}")]
    InvalidPeerAddress(String),

    #[error("Peer transport unavailable: {0}")]
    TransportUnavailable(String),

    #[error(transparent)]
    Replication(#[from] ReplicationError),
}

impl ControlError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ControlError::InvalidPeerAddress(_) => StatusCode::BAD_REQUEST,
            ControlError::TransportUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ControlError::Replication(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ControlError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
