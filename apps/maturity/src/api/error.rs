//! API error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maturity_core::MaturityError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A year, category or dimension outside the dataset.
    #[error("Not found: {0}")]
    UnknownKey(String),

    /// A malformed or out-of-range parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The global request budget is exhausted.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::UnknownKey(_) => (StatusCode::NOT_FOUND, "UNKNOWN_KEY"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
        }
    }
}

impl From<MaturityError> for ApiError {
    fn from(err: MaturityError) -> Self {
        match err {
            MaturityError::UnknownYear(_)
            | MaturityError::UnknownCategory(_)
            | MaturityError::UnknownDimension(_) => ApiError::UnknownKey(err.to_string()),
            MaturityError::AdjustmentOutOfRange(_) | MaturityError::InvalidAdjustment(_) => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_client_error() {
            tracing::debug!(%status, "request rejected: {self}");
        }
        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
