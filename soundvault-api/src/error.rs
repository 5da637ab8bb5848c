//! Error types for soundvault-api
//!
//! [`ApiError`] is the single place where failures become HTTP responses.
//! Every variant renders as `{success: false, error}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::api::envelope::Envelope;
use crate::pagination::PaginationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity not found (404); carries the entity name
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Bad query parameter (400)
    #[error("{0}")]
    InvalidParameter(String),

    /// Request body failed validation (400)
    #[error("{0}")]
    Validation(String),

    /// Extractor rejection that keeps the framework's status (413, 400, ...)
    #[error("{1}")]
    Rejected(StatusCode, String),

    /// Store failure (500), message passed through unchanged
    #[error("{0}")]
    Store(#[from] sqlx::Error),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),

    /// soundvault-common error
    #[error("{0}")]
    Common(#[from] soundvault_common::Error),
}

/// Result alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidParameter(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected(status, _) => *status,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Common(err) => match err {
                soundvault_common::Error::NotFound(_) => StatusCode::NOT_FOUND,
                soundvault_common::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<PaginationError> for ApiError {
    fn from(err: PaginationError) -> Self {
        ApiError::InvalidParameter(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Oversized or unreadable body
            JsonRejection::BytesRejection(_) => {
                ApiError::Rejected(rejection.status(), rejection.body_text())
            }
            _ => ApiError::Validation(rejection.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON encoding failed: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        (status, Envelope::error(message)).into_response()
    }
}
