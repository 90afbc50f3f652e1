use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::admission::{ErrorKind, Rejection};

/// Structured error response returned by all endpoints on failure.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `error`.
    #[schema(example = "error")]
    pub status: String,
    /// Machine-readable error code. One of: `INVALID_REQUEST`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `NOT_FOUND`, `NOT_IN_CONTAINER`, `NO_PRIVILEGE`,
    /// `SCHEDULE_VIOLATION`, `LANGUAGE_NOT_ALLOWED`, `PERSISTENCE_FAILURE`.
    #[schema(example = "SCHEDULE_VIOLATION")]
    pub code: String,
    /// Human-readable statement shown to the submitter.
    #[schema(example = "Contest is not start")]
    pub statement: String,
}

impl ErrorBody {
    fn new(code: &str, statement: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            code: code.into(),
            statement: statement.into(),
        }
    }
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    TokenMissing,
    TokenInvalid,
    Rejected(Rejection),
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidRequest | ErrorKind::LanguageNotAllowed => StatusCode::BAD_REQUEST,
        ErrorKind::NoPrivilege | ErrorKind::ScheduleViolation => StatusCode::FORBIDDEN,
        ErrorKind::ResourceNotFound | ErrorKind::NotInContainer => StatusCode::NOT_FOUND,
        ErrorKind::PersistenceFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("TOKEN_MISSING", "Authentication required"),
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("TOKEN_INVALID", "Invalid or expired token"),
            ),
            AppError::Rejected(rejection) => {
                if let Rejection::Storage(detail) = &rejection {
                    tracing::error!("Database error: {}", detail);
                }
                (
                    status_for(rejection.kind()),
                    ErrorBody::new(rejection.code(), rejection.statement()),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        AppError::Rejected(rejection)
    }
}
