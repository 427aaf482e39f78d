use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use idstore_core::error::CoreError;
use idstore_db::store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for failed store
/// calls. Its [`IntoResponse`] impl is the one place where failures become
/// status codes; no variant maps to a 5xx.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `idstore_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An awaited store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A path, query or body that could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Timeout { .. } => {
                    (StatusCode::PARTIAL_CONTENT, "PARTIAL_CONTENT", core.to_string())
                }
            },

            // --- Store failures: the call may have partially succeeded ---
            AppError::Store(err) => {
                tracing::warn!(error = %err, "Store call failed");
                (
                    StatusCode::PARTIAL_CONTENT,
                    "PARTIAL_CONTENT",
                    "The store did not complete the operation".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
