// ABOUTME: Error types for the gateway's REST API.
// ABOUTME: Maps engine failures to 503/404/400/500 with a JSON error body.

use crate::engine::EngineError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Message returned when the exec body has no usable `command`.
pub const MISSING_COMMAND: &str = "Campo \"command\" é obrigatório";

/// Errors a handler can answer with.
///
/// Every engine failure is folded into one of these four buckets; nothing
/// escapes a handler as a panic or a bare 500 from the framework.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The engine connection was never established.
    #[error("Docker client não conectado")]
    Unavailable,

    /// The container identifier does not resolve.
    #[error("Container não encontrado")]
    NotFound,

    /// The request is malformed; the engine was not called.
    #[error("{0}")]
    InvalidRequest(String),

    /// Any other engine failure, message passed through verbatim.
    #[error("{0}")]
    Engine(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound(detail) => {
                tracing::debug!(%detail, "container not found");
                Self::NotFound
            }
            EngineError::Runtime(message) => {
                tracing::warn!(error = %message, "engine operation failed");
                Self::Engine(message)
            }
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
