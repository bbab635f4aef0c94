//! Response types and error handling for API endpoints
//!
//! Every failure is rendered as `{"detail": ..., "code": ...}`; clients
//! surface `detail` to the user.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use org_common::{AppError, ErrorResponse};
use org_core::DomainError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    fn into_app_error(self) -> AppError {
        match self {
            Self::App(e) => e,
            Self::Domain(e) => AppError::Domain(e),
            Self::InvalidBody(msg) => AppError::Validation(msg),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Domain(errors.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.into_app_error();
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = ?err, "Server error occurred");
        }

        (status, Json(ErrorResponse::from(&err))).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
