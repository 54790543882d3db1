//! Schema-missing recovery for store operations.
//!
//! An operation is attempted once. If it fails because the `responses` table
//! is gone, the schema is recreated and the operation is attempted exactly
//! one more time. Any failure after recreation is terminal.

use futures::future::BoxFuture;

use crate::store::{ResponseStore, StoreError};

/// Result of a guarded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guarded<T> {
    pub value: T,
    /// The table was missing and had to be recreated before `value` was
    /// produced.
    pub schema_recreated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// The first attempt failed for a reason other than a missing table.
    #[error(transparent)]
    Store(StoreError),

    /// The table was missing, and recreating it or the single retry failed.
    #[error("Schema recreated but retry failed: {0}")]
    RetryExhausted(#[source] StoreError),
}

/// Run `op` against `store`, recreating the schema and retrying once if the
/// table does not exist.
///
/// ```ignore
/// let guarded = with_schema_retry(store, |s| s.insert(&submission)).await?;
/// ```
pub async fn with_schema_retry<'a, T, F>(
    store: &'a dyn ResponseStore,
    op: F,
) -> Result<Guarded<T>, GuardError>
where
    F: Fn(&'a dyn ResponseStore) -> BoxFuture<'a, Result<T, StoreError>>,
{
    match op(store).await {
        Ok(value) => Ok(Guarded {
            value,
            schema_recreated: false,
        }),
        Err(err) if err.is_schema_missing() => {
            tracing::warn!(error = %err, "Responses table missing, recreating schema");

            let retried = match store.ensure_schema().await {
                Ok(()) => op(store).await,
                Err(err) => Err(err),
            };

            match retried {
                Ok(value) => {
                    tracing::info!("Schema recreated, retry succeeded");
                    Ok(Guarded {
                        value,
                        schema_recreated: true,
                    })
                }
                Err(retry_err) => {
                    tracing::error!(error = %retry_err, "Retry after schema recreation failed");
                    Err(GuardError::RetryExhausted(retry_err))
                }
            }
        }
        Err(err) => Err(GuardError::Store(err)),
    }
}
