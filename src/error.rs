//! Error types for the Biblos server

use std::collections::BTreeMap;

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchRecord = 4,
    BadValue = 5,
    FormInvalid = 6,
    ConstraintViolation = 7,
}

/// Field name → list of messages, as a form expects them back
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Unauthenticated or missing capability. Rendered as a redirect to the
    /// login entry point rather than a bare status, so the browser flow lands
    /// on a page that can recover.
    #[error("Redirecting to {location}")]
    AuthRedirect { location: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Form submission rejected; the caller re-renders the form with these
    /// per-field messages.
    #[error("Form validation failed")]
    FormInvalid { errors: FieldErrors },

    /// The store refused the operation (referential or unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-field form error, the common case.
    pub fn form_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::FormInvalid { errors }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Per-field form errors, present only for rejected form submissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self {
            AppError::AuthRedirect { location } => {
                return (StatusCode::FOUND, [(LOCATION, location)]).into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord, msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg, None),
            AppError::FormInvalid { errors } => (
                StatusCode::BAD_REQUEST,
                ErrorCode::FormInvalid,
                "Form validation failed".to_string(),
                Some(errors),
            ),
            AppError::Constraint(msg) => {
                (StatusCode::CONFLICT, ErrorCode::ConstraintViolation, msg, None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            errors,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_redirect_is_a_302_with_location() {
        let err = AppError::AuthRedirect {
            location: "/accounts/login/?next=/catalog/mybooks/".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/accounts/login/?next=/catalog/mybooks/"
        );
    }

    #[test]
    fn not_found_is_a_404() {
        let response = AppError::NotFound("no such copy".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn form_errors_are_a_400() {
        let err = AppError::form_field("renewal_date", "Invalid date - renewal in past");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn constraint_is_a_409() {
        let response = AppError::Constraint("author still has books".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
