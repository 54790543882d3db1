//! Handlers for quiz submissions and the admin listing.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use survey_core::types::DbId;
use survey_core::validation::validate_payload;
use survey_db::guard::with_schema_retry;
use survey_db::models::response::QuizResponse;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Successful submission payload.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub id: DbId,
    pub row: QuizResponse,
    /// Present (and `true`) only when the table had to be recreated.
    #[serde(rename = "autoCreatedTable", skip_serializing_if = "Option::is_none")]
    pub auto_created_table: Option<bool>,
}

/// POST /api/submit
pub async fn submit(State(state): State<AppState>, body: Bytes) -> AppResult<Json<SubmitResponse>> {
    let payload = parse_body(&body)?;
    let submission = validate_payload(&payload)?;

    let guarded = with_schema_retry(state.store.as_ref(), |store| store.insert(&submission)).await?;
    let row = guarded.value;
    tracing::info!(id = row.id, "Stored quiz response");

    Ok(Json(SubmitResponse {
        ok: true,
        id: row.id,
        row,
        auto_created_table: guarded.schema_recreated.then_some(true),
    }))
}

/// GET /api/quiz-responses
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<QuizResponse>>> {
    let guarded = with_schema_retry(state.store.as_ref(), |store| store.list_all()).await?;
    Ok(Json(guarded.value))
}

/// Parse a request body leniently: an empty body is `null`, anything that is
/// not valid JSON is a bad request.
fn parse_body(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "Malformed JSON body");
        AppError::BadRequest("Malformed JSON body".to_string())
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_body_parses_as_null() {
        assert_eq!(parse_body(b"").unwrap(), Value::Null);
        assert_eq!(parse_body(b" \n").unwrap(), Value::Null);
    }

    #[test]
    fn json_body_is_parsed() {
        assert_eq!(parse_body(br#"{"ts":"x"}"#).unwrap(), json!({"ts": "x"}));
    }

    #[test]
    fn malformed_body_is_bad_request() {
        assert_matches!(parse_body(b"{ts:"), Err(AppError::BadRequest(_)));
    }
}
