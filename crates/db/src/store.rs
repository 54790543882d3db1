//! The response store port and its PostgreSQL adapter.
//!
//! Handlers depend on [`ResponseStore`] rather than on a pool so the HTTP
//! layer can be exercised against a substitute store.

use async_trait::async_trait;
use sqlx::PgPool;
use survey_core::validation::Submission;

use crate::models::response::QuizResponse;
use crate::repositories::ResponseRepo;
use crate::schema;

/// Storage failure, split into the one condition the service recovers from
/// and everything else.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The `responses` table does not exist (SQLSTATE `42P01`).
    #[error("Relation does not exist: {0}")]
    SchemaMissing(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn is_schema_missing(&self) -> bool {
        matches!(self, Self::SchemaMissing(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if schema::is_undefined_table(&err) {
            Self::SchemaMissing(err.to_string())
        } else {
            Self::Database(err)
        }
    }
}

/// Durable home of quiz responses.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Persist a validated submission and return the stored row.
    async fn insert(&self, submission: &Submission) -> Result<QuizResponse, StoreError>;

    /// Every stored row, highest id first.
    async fn list_all(&self) -> Result<Vec<QuizResponse>, StoreError>;

    /// Whether a trivial round-trip to the backing database succeeds.
    async fn health_check(&self) -> bool;

    /// Idempotently create the backing table.
    async fn ensure_schema(&self) -> Result<(), StoreError>;
}

/// [`ResponseStore`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgResponseStore {
    pool: PgPool,
}

impl PgResponseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseStore for PgResponseStore {
    async fn insert(&self, submission: &Submission) -> Result<QuizResponse, StoreError> {
        Ok(ResponseRepo::create(&self.pool, submission).await?)
    }

    async fn list_all(&self) -> Result<Vec<QuizResponse>, StoreError> {
        Ok(ResponseRepo::list(&self.pool).await?)
    }

    async fn health_check(&self) -> bool {
        match crate::health_check(&self.pool).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "Database health check failed");
                false
            }
        }
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(schema::ensure_schema(&self.pool).await?)
    }
}
