//! Bulk maintenance operations. Not reachable over HTTP.

use sqlx::PgPool;

use crate::repositories::ResponseRepo;
use crate::schema;

/// Delete every stored response and reset the id sequence.
///
/// Returns the number of rows that existed beforehand. A missing table counts
/// as zero rows and is not an error.
pub async fn clear_responses(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let existing = match ResponseRepo::count(pool).await {
        Ok(n) => n,
        Err(err) if schema::is_undefined_table(&err) => 0,
        Err(err) => return Err(err),
    };

    match ResponseRepo::truncate(pool).await {
        Ok(()) => {}
        Err(err) if schema::is_undefined_table(&err) => {
            tracing::debug!("Responses table absent, nothing to truncate");
        }
        Err(err) => return Err(err),
    }

    Ok(existing)
}
