//! Repository for the `responses` table.

use sqlx::PgPool;
use survey_core::validation::Submission;

use crate::models::response::QuizResponse;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ts, lang, gender, q1, q2, q3, q4, q5";

/// Provides the SQL operations on quiz responses. Rows are never updated or
/// deleted individually.
pub struct ResponseRepo;

impl ResponseRepo {
    /// Insert a validated submission, returning the stored row with its
    /// assigned id.
    pub async fn create(pool: &PgPool, input: &Submission) -> Result<QuizResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO responses (ts, lang, gender, q1, q2, q3, q4, q5)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizResponse>(&query)
            .bind(&input.ts)
            .bind(&input.lang)
            .bind(&input.gender)
            .bind(input.q1)
            .bind(&input.q2)
            .bind(&input.q3)
            .bind(&input.q4)
            .bind(input.q5)
            .fetch_one(pool)
            .await
    }

    /// List every response, most recent (highest id) first.
    pub async fn list(pool: &PgPool) -> Result<Vec<QuizResponse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM responses ORDER BY id DESC");
        sqlx::query_as::<_, QuizResponse>(&query)
            .fetch_all(pool)
            .await
    }

    /// Number of stored responses.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM responses")
            .fetch_one(pool)
            .await?;
        Ok(n)
    }

    /// Remove every response and reset the id sequence.
    pub async fn truncate(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE TABLE responses RESTART IDENTITY")
            .execute(pool)
            .await?;
        Ok(())
    }
}
