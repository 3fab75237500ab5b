//! HTTP error contract for the portal API.
//!
//! Every failure leaving a handler serializes to the same JSON shape,
//! `{"error": <message>, "code": <CODE>}`, so the frontend can branch on
//! `code` without parsing prose. Messages for 4xx responses are written for
//! end users; 5xx responses always carry a sanitized message, with the real
//! cause going to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nextif_core::error::CoreError;
use serde_json::json;

/// Sanitized message for every 500 response.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error type returned by all portal handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain rule violation surfaced from `nextif_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Query or pool failure from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request is well-formed JSON but unusable for another reason.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unexpected state inside the service itself.
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Handler result alias.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Resolve the HTTP status, machine code, and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_error_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.clone())
            }
            AppError::InternalError(message) => {
                tracing::error!(error = %message, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error onto the HTTP contract.
fn core_error_parts(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(message) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
        }
        CoreError::Conflict(message) => (StatusCode::CONFLICT, "CONFLICT", message.clone()),
        CoreError::Unauthorized(message) => {
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message.clone())
        }
        CoreError::Forbidden(message) => (StatusCode::FORBIDDEN, "FORBIDDEN", message.clone()),
        CoreError::Internal(message) => {
            tracing::error!(error = %message, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

/// Decide what a sqlx failure means to the client.
///
/// `RowNotFound` becomes a 404. A Postgres 23505 on one of our `uq_`-named
/// unique constraints becomes a 409 naming the constraint (the schema keeps
/// the prefix for exactly this reason). Anything else is a 500 with the
/// detail logged, never echoed.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }

    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}
