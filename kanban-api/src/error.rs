//! Error handling for the API server
//!
//! Every response body is the service envelope
//! `{"ErrorMessage": ..., "ReturnValue": ...}`. Failures additionally carry
//! an HTTP status derived from the [`ErrorKind`] of the rejected operation.
//!
//! # Example
//!
//! ```no_run
//! use kanban_api::error::{envelope, ApiResult};
//! use kanban_shared::service::{KanbanService, Response};
//! use axum::Json;
//!
//! async fn handler(service: &KanbanService) -> ApiResult<Json<Response<i64>>> {
//!     envelope(service.get_column_limit("user@example.com", "sprint", 0))
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response as HttpResponse},
    Json,
};
use kanban_shared::kanban::ErrorKind;
use kanban_shared::service::Response;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidationErrors;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401) - not logged in or wrong credentials
    Unauthorized(String),

    /// Forbidden (403) - not the owner, not the assignee
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., duplicate board name
    Conflict(String),

    /// Unprocessable entity (422) - malformed request fields
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl ApiError {
    /// Map a rejected operation to its HTTP error
    pub fn from_kind(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::Validation => ApiError::BadRequest(message),
            ErrorKind::Unauthenticated => ApiError::Unauthorized(message),
            ErrorKind::Forbidden => ApiError::Forbidden(message),
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::Conflict => ApiError::Conflict(message),
            ErrorKind::Internal => ApiError::InternalError(message),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Turn a service envelope into a handler result
///
/// Successful envelopes are returned as they are with 200. Failed ones become
/// the [`ApiError`] matching their kind.
///
/// # Errors
///
/// Returns the mapped [`ApiError`] when the envelope holds an error message.
pub fn envelope<T>(response: Response<T>) -> ApiResult<Json<Response<T>>> {
    match response.error_message {
        None => Ok(Json(response)),
        Some(message) => {
            let kind = response.error_kind.unwrap_or(ErrorKind::Internal);
            Err(ApiError::from_kind(kind, message))
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> HttpResponse {
        let status = self.status_code();

        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
            ApiError::ValidationError(errors) => {
                let fields: Vec<String> = errors
                    .iter()
                    .map(|detail| format!("{}: {}", detail.field, detail.message))
                    .collect();
                format!("Request validation failed: {}", fields.join("; "))
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        };

        let body: Response<()> = Response {
            error_message: Some(message),
            return_value: None,
            error_kind: None,
        };

        (status, Json(body)).into_response()
    }
}

/// Convert `validator` failures into field details
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationErrorDetail {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::ValidationError(details)
    }
}
