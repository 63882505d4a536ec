//! Gateway error taxonomy and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::unsplash::UpstreamError;

/// Errors surfaced by the gateway routes
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Malformed width, height, seed or format
    #[error("{0}")]
    InvalidInput(String),

    /// The photo API answered with an error payload
    #[error("upstream rejected request: {}", .0.join("; "))]
    UpstreamRejected(Vec<String>),

    /// The search came back empty
    #[error("{0}")]
    NotFound(String),

    /// Transport, decoding, or any other failure
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl GatewayError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GatewayError::InvalidInput(message.into())
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidInput(_) | GatewayError::UpstreamRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for GatewayError {
    fn from(e: UpstreamError) -> Self {
        GatewayError::Unexpected(e.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            GatewayError::InvalidInput(message) | GatewayError::NotFound(message) => {
                (status, message).into_response()
            }
            GatewayError::UpstreamRejected(errors) => {
                warn!("Upstream rejected request: {:?}", errors);
                (status, Json(errors)).into_response()
            }
            GatewayError::Unexpected(detail) => {
                error!("Request failed: {}", detail);
                (status, "Internal Server Error").into_response()
            }
        }
    }
}
