//! Application error types.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gestor_core::auth::AuthError;
use gestor_core::store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::messages;
use crate::models::{ErrorResponse, FieldError, ValidationErrorResponse};

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// Field-level request validation failures (400, `{errors}`).
    #[error("Validation error: {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Body could not be parsed as the expected JSON (400).
    #[error("Malformed body: {0}")]
    MalformedBody(String),

    /// Duplicate email on registration (400).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unknown email or wrong password; deliberately indistinguishable (400).
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Product create/update failures below validation (400).
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        error: Option<String>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected failure. The underlying text is passed to the client.
    #[error("Internal server error: {message}: {error}")]
    Internal { message: String, error: String },
}

impl AppError {
    /// Internal error with the generic message.
    pub fn internal(error: impl Into<String>) -> Self {
        AppError::Internal {
            message: messages::INTERNAL.into(),
            error: error.into(),
        }
    }

    /// Replace the client-facing message of an `Internal` error; other
    /// variants pass through.
    pub fn in_context(self, message: &str) -> Self {
        match self {
            AppError::Internal { error, .. } => AppError::Internal {
                message: message.into(),
                error,
            },
            other => other,
        }
    }

    /// Downgrade an `Internal` error to a 400 carrying the same detail.
    pub fn internal_as_bad_request(self, message: &str) -> Self {
        match self {
            AppError::Internal { error, .. } => AppError::BadRequest {
                message: message.into(),
                error: Some(error),
            },
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            AppError::Validation(errors) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse { errors }),
                )
                    .into_response();
            }
            AppError::MalformedBody(e) => {
                (StatusCode::BAD_REQUEST, messages::INVALID_BODY.to_string(), Some(e))
            }
            AppError::Conflict(m) => (StatusCode::BAD_REQUEST, m, None),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                messages::INVALID_CREDENTIALS.to_string(),
                None,
            ),
            AppError::BadRequest { message, error } => (StatusCode::BAD_REQUEST, message, error),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m, None),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, m, None),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m, None),
            AppError::Internal { message, error } => {
                error!(%message, %error, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(error))
            }
        };
        let body = Json(ErrorResponse {
            message,
            error: detail,
        });
        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => AppError::Conflict(messages::EMAIL_TAKEN.into()),
            StoreError::Db(e) => AppError::internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::TokenError(_) => AppError::Unauthorized(messages::TOKEN_INVALID.into()),
            AuthError::Store(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::internal(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        let cases = [
            (AppError::Validation(vec![]), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn duplicate_maps_to_conflict_message() {
        let err = AppError::from(StoreError::Duplicate("a@b.co".into()));
        assert!(matches!(err, AppError::Conflict(ref m) if m == messages::EMAIL_TAKEN));
    }

    #[test]
    fn context_only_rewrites_internal() {
        let err = AppError::internal("db down").in_context(messages::LOGIN_FAILED);
        assert!(matches!(
            err,
            AppError::Internal { ref message, ref error }
                if message == messages::LOGIN_FAILED && error == "db down"
        ));

        let err = AppError::InvalidCredentials.in_context(messages::LOGIN_FAILED);
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[test]
    fn internal_downgrades_to_bad_request() {
        let err = AppError::internal("constraint").internal_as_bad_request("nope");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
