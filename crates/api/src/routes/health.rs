use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub ok: bool,
    /// Whether the database is reachable.
    pub db: bool,
}

/// GET /api/health -- 200 when the database answers, 500 otherwise.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db = state.store.health_check().await;
    let status = if db {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse { ok: db, db }))
}

/// Mount health check routes (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
