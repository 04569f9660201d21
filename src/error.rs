//! Central error type with HTTP status code mapping.
//!
//! [`HubError`] is the single error type crossing layer boundaries. Each
//! variant maps to an HTTP status code and is rendered as the standard
//! response envelope with `success: false`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON body for every failed request.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "success": false,
///   "message": "invalid parameter radiusKm: must be between 0.1 and 5000",
///   "details": "field: radiusKm"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` for error responses.
    pub success: bool,
    /// Human-readable error message.
    pub message: String,
    /// Optional per-field or provider-supplied detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant            | HTTP status                 |
/// |--------------------|-----------------------------|
/// | `Validation`       | 400 Bad Request             |
/// | `Signature`        | 400 Bad Request             |
/// | `Unauthenticated`  | 401 Unauthorized            |
/// | `Forbidden`        | 403 Forbidden               |
/// | `NotFound`         | 404 Not Found               |
/// | `Database`         | 500 Internal Server Error   |
/// | `Internal`         | 500 Internal Server Error   |
/// | `Upstream`         | 503 Service Unavailable     |
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Request parameters or body failed validation.
    #[error("invalid parameter {field}: {message}")]
    Validation {
        /// Name of the offending parameter or field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// Webhook signature header missing, malformed, or failed verification.
    #[error("webhook signature verification failed: {0}")]
    Signature(String),

    /// Missing or invalid bearer credential.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Valid credential without sufficient privilege.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Store query or mutation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Auth or payment provider call failed.
    #[error("upstream service error: {0}")]
    Upstream(String),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// Shorthand constructor for [`HubError::Validation`].
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Signature(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Per-field detail included in the response body, when available.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Validation { field, .. } => Some(format!("field: {field}")),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for HubError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("row not found".to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            success: false,
            message: self.to_string(),
            details: self.details(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
