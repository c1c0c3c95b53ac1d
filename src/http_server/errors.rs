//! # HTTP API Errors
//!
//! Caller input errors map to 422, backend failures to 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::gazettes::GatewayError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// A query parameter could not be parsed
    #[error("Invalid query parameter {name}: {value}")]
    InvalidQueryParam { name: String, value: String },

    /// A query parameter parsed but is out of range
    #[error("Query parameter {name} must be at least {minimum}")]
    OutOfRange { name: String, minimum: usize },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// The storage backend failed
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// A blocking worker did not complete
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid(name: &str, value: &str) -> Self {
        ApiError::InvalidQueryParam {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidQueryParam { .. } | ApiError::OutOfRange { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Gateway(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::from(&self));
        (self.status_code(), body).into_response()
    }
}
