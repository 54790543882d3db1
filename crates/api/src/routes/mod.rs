pub mod frontend;
pub mod health;
pub mod responses;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health            GET   database connectivity
/// /submit            POST  validate and store a quiz response
/// /quiz-responses    GET   every stored response, newest first
/// ```
///
/// Unmatched paths under `/api` answer a JSON 404 instead of falling through
/// to the front-end.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(responses::router())
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
