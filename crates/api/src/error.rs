use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use survey_core::error::CoreError;
use survey_db::guard::GuardError;

/// Error body for storage failures that were not recovered.
pub const SERVER_ERROR: &str = "Server error";

/// Error body when the table was recreated but the retry still failed.
pub const TABLE_RECREATED_RETRY_FAILED: &str = "TABLE_RECREATED_RETRY_FAILED";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`]; storage details are logged and never
/// returned to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A submission failed validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage operation failed after the schema-missing recovery policy.
    #[error(transparent)]
    Storage(#[from] GuardError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(CoreError::MissingFields { fields }) => {
                tracing::debug!(?fields, "Submission rejected");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Missing fields", "fields": fields }),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),

            AppError::Storage(GuardError::Store(err)) => {
                tracing::error!(error = %err, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": SERVER_ERROR }),
                )
            }

            AppError::Storage(GuardError::RetryExhausted(err)) => {
                tracing::error!(error = %err, "Storage error after schema recreation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": TABLE_RECREATED_RETRY_FAILED }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
