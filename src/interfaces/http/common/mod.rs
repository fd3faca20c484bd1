//! Shared HTTP types: error responses and extractors

pub mod validated_json;

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::{Issue, ValidationError};

pub use validated_json::{FromPayload, ValidatedJson};

/// Error body: `{"success": false, "error": "...", "details": [...]}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    pub error: String,
    /// Field-level issues, present on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<Issue>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<Issue>) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The body could not be read (too large, connection error).
    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(err) => {
                tracing::warn!(issues = err.issues.len(), "Rejected request body");
                let body = ErrorResponse::new("Invalid request data").with_details(err.issues);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::NotFound(path) => {
                tracing::debug!(%path, "No route");
                let body = ErrorResponse::new(format!("Not found: {}", path));
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            Self::Body { status, message } => {
                tracing::warn!(%status, %message, "Could not read request body");
                (status, Json(ErrorResponse::new(message))).into_response()
            }
        }
    }
}
