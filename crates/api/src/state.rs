use std::sync::Arc;

use survey_db::store::ResponseStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Durable response storage. Production uses `PgResponseStore`.
    pub store: Arc<dyn ResponseStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ResponseStore>) -> Self {
        Self { store }
    }
}
