use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use school_core::error::CoreError;
use serde_json::json;

/// Body returned when an avatar upload exceeds the size cap.
pub const FILE_TOO_BIG: &str = "File is too big";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`]:
///
/// - not-found errors produce a bare 404 with an empty body;
/// - an oversized upload produces 400 with a plain-text body;
/// - everything else produces a `{ "error", "code" }` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `school_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a missing entity.
    pub fn not_found(entity: &'static str, id: school_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    return StatusCode::NOT_FOUND.into_response();
                }
                CoreError::PayloadTooLarge { limit } => {
                    tracing::debug!(limit, "Upload rejected as too large");
                    return (StatusCode::BAD_REQUEST, FILE_TOO_BIG).into_response();
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => match err {
                sqlx::Error::RowNotFound => return StatusCode::NOT_FOUND.into_response(),
                other => {
                    tracing::error!(error = %other, "Database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
