use axum::routing::{get, post};
use axum::Router;

use crate::handlers::responses;
use crate::state::AppState;

/// Mount submission and listing routes (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(responses::submit))
        .route("/quiz-responses", get(responses::list))
}
