//! Schema guard for the `responses` table.
//!
//! The table is created at start-up and recreated on demand whenever a
//! statement fails because it has been dropped. The DDL is `IF NOT EXISTS`,
//! so concurrent callers racing to recreate it are harmless.

use sqlx::PgPool;

/// PostgreSQL SQLSTATE for `undefined_table` ("relation does not exist").
pub const UNDEFINED_TABLE: &str = "42P01";

/// Creation statement for the `responses` table.
pub const RESPONSES_DDL: &str = "
    CREATE TABLE IF NOT EXISTS responses (
        id SERIAL PRIMARY KEY,
        ts TEXT NOT NULL,
        lang TEXT NOT NULL,
        gender TEXT NOT NULL,
        q1 INTEGER NOT NULL,
        q2 TEXT NOT NULL,
        q3 TEXT NOT NULL,
        q4 TEXT NOT NULL,
        q5 INTEGER NOT NULL
    )
";

/// Create the `responses` table if it does not exist. A no-op otherwise.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(RESPONSES_DDL).execute(pool).await?;
    Ok(())
}

/// Whether `err` is the database reporting a missing relation.
pub fn is_undefined_table(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNDEFINED_TABLE),
        _ => false,
    }
}
