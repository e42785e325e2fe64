use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::error_payload::ErrorPayload;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("a user cannot follow themself")]
    SelfFollow,

    /// A concurrent toggle of the same pair won the race. The transaction
    /// has rolled back; the call is safe to retry.
    #[error("follow state changed concurrently, retry")]
    ConflictingToggle,

    #[error("User not found")]
    UserNotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Any store failure. The enclosing transaction has rolled back, so no
    /// partial application is observable.
    #[error("An error occurred while accessing the database")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    pub fn code(&self) -> StatusCode {
        match self {
            AppError::SelfFollow => StatusCode::BAD_REQUEST,
            AppError::ConflictingToggle => StatusCode::CONFLICT,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> String {
        match self {
            AppError::SelfFollow => "SELF_FOLLOW",
            AppError::ConflictingToggle => "CONFLICTING_TOGGLE",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
        }
        .to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code();
        let error_response = ErrorPayload {
            message: self.to_string(),
            code: status.as_u16(),
            r#type: self.error_type(),
            details: None,
        };

        (status, Json(error_response)).into_response()
    }
}
