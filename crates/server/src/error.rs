//! API error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use doable_core::StoreError;

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a handler can surface to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("health check failed: {reason}")]
    HealthCheckFailed { reason: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Create a not found error
    pub fn not_found<T: Into<String>>(resource: T) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a validation error
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    /// Create a health check error
    pub fn health_check<T: Into<String>>(reason: T) -> Self {
        ApiError::HealthCheckFailed {
            reason: reason.into(),
        }
    }

    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::HealthCheckFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for consistent API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "RESOURCE_NOT_FOUND",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::HealthCheckFailed { .. } => "HEALTH_CHECK_FAILED",
            ApiError::Store(_) => "STORE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(err) = &self {
            tracing::error!(error = %err, "store failure while handling request");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));
        (self.status_code(), body).into_response()
    }
}
