//! Shared helpers for API integration tests.
//!
//! Most tests run against [`InMemoryStore`], a substitute `ResponseStore`
//! whose failure modes can be switched on per test, so no database is needed.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use survey_api::config::ServerConfig;
use survey_api::router::build_app_router;
use survey_api::state::AppState;
use survey_core::validation::Submission;
use survey_db::models::response::QuizResponse;
use survey_db::store::{ResponseStore, StoreError};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Substitute store
// ---------------------------------------------------------------------------

/// In-memory `ResponseStore` that mimics the table-level behaviour of the
/// PostgreSQL store: serial ids, newest-first listing, and a table that can
/// be "dropped" from outside.
pub struct InMemoryStore {
    rows: Mutex<Vec<QuizResponse>>,
    next_id: AtomicI32,
    table_present: AtomicBool,
    healthy: AtomicBool,
    broken: AtomicBool,
    recreation_fails: AtomicBool,
    ensure_calls: AtomicUsize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            table_present: AtomicBool::new(true),
            healthy: AtomicBool::new(true),
            broken: AtomicBool::new(false),
            recreation_fails: AtomicBool::new(false),
            ensure_calls: AtomicUsize::new(0),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Simulate `DROP TABLE responses`.
    pub fn drop_table(&self) {
        self.table_present.store(false, Ordering::SeqCst);
        self.rows.lock().unwrap().clear();
    }

    /// Make every operation fail with a non-schema database error.
    pub fn break_storage(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    /// Make schema recreation fail.
    pub fn fail_recreation(&self) {
        self.recreation_fails.store(true, Ordering::SeqCst);
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn ensure_calls(&self) -> usize {
        self.ensure_calls.load(Ordering::SeqCst)
    }

    fn check_table(&self) -> Result<(), StoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::Protocol(
                "password authentication failed for user \"survey\"".into(),
            )));
        }
        if !self.table_present.load(Ordering::SeqCst) {
            return Err(StoreError::SchemaMissing(
                "relation \"responses\" does not exist".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ResponseStore for InMemoryStore {
    async fn insert(&self, submission: &Submission) -> Result<QuizResponse, StoreError> {
        self.check_table()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = QuizResponse::from_submission(id, submission);
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<QuizResponse>, StoreError> {
        self.check_table()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn health_check(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        if self.recreation_fails.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.table_present.store(true, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig`. Front-end files are served from
/// `frontend_dir`.
pub fn test_config(frontend_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: Vec::new(),
        frontend_dir,
    }
}

/// Build the full application router around any store.
pub fn build_app_with(store: Arc<dyn ResponseStore>, config: &ServerConfig) -> Router {
    build_app_router(AppState::new(store), config)
}

/// Build the full application router around an in-memory store, with a
/// front-end directory that does not exist.
pub fn build_test_app(store: Arc<InMemoryStore>) -> Router {
    let config = test_config(PathBuf::from("/nonexistent-frontend"));
    build_app_with(store, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    post_raw(app, uri, json.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// A payload that passes validation.
pub fn valid_payload() -> serde_json::Value {
    serde_json::json!({
        "ts": "2024-01-01T00:00:00Z",
        "lang": "en",
        "gender": "f",
        "q1": 3,
        "q2": "a",
        "q3": "b",
        "q4": "c",
        "q5": 4,
    })
}
