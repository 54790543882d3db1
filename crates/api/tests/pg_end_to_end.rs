//! End-to-end tests against a real PostgreSQL database through the full
//! router and `PgResponseStore`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post_json, valid_payload};
use serde_json::json;
use sqlx::PgPool;
use survey_db::schema::ensure_schema;
use survey_db::store::PgResponseStore;

fn pg_app(pool: PgPool) -> axum::Router {
    let config = common::test_config("/nonexistent-frontend".into());
    common::build_app_with(Arc::new(PgResponseStore::new(pool)), &config)
}

#[sqlx::test(migrations = false)]
async fn submit_then_list_round_trip(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();

    let app = pg_app(pool.clone());
    let first = body_json(post_json(app, "/api/submit", valid_payload()).await).await;
    let mut payload = valid_payload();
    payload["q1"] = json!(1);
    payload["q5"] = json!(5);
    let second = body_json(post_json(pg_app(pool.clone()), "/api/submit", payload).await).await;

    let response = get(pg_app(pool), "/api/quiz-responses").await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = body_json(response).await;
    assert_eq!(rows, json!([second["row"], first["row"]]));
}

#[sqlx::test(migrations = false)]
async fn submit_recreates_externally_dropped_table(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    sqlx::query("DROP TABLE responses")
        .execute(&pool)
        .await
        .unwrap();

    let response = post_json(pg_app(pool.clone()), "/api/submit", valid_payload()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["autoCreatedTable"], true);
    assert_eq!(json["id"], 1);
}

#[sqlx::test(migrations = false)]
async fn health_reports_live_database(pool: PgPool) {
    let response = get(pg_app(pool), "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true, "db": true }));
}
