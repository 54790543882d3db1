//! Submission validation.
//!
//! A quiz submission arrives as loosely typed JSON. [`validate_payload`]
//! checks every field independently and either returns a normalized
//! [`Submission`] ready for insertion or a [`CoreError::MissingFields`]
//! naming every offending field.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::{Score, SCORE_MAX, SCORE_MIN};

/// Submission fields in the order violations are reported.
pub const FIELD_ORDER: [&str; 8] = ["ts", "lang", "gender", "q1", "q2", "q3", "q4", "q5"];

/// A validated submission. Every text field is non-empty and both scores
/// lie in `SCORE_MIN..=SCORE_MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Caller-supplied timestamp. Stored as given, never parsed.
    pub ts: String,
    pub lang: String,
    pub gender: String,
    pub q1: Score,
    pub q2: String,
    pub q3: String,
    pub q4: String,
    pub q5: Score,
}

/// Validate an arbitrary JSON payload.
///
/// Anything other than a JSON object is treated as an empty object, so every
/// field is reported missing.
pub fn validate_payload(payload: &Value) -> Result<Submission, CoreError> {
    match payload {
        Value::Object(map) => validate_submission(map),
        _ => validate_submission(&Map::new()),
    }
}

/// Validate a submission object, collecting every violation.
pub fn validate_submission(data: &Map<String, Value>) -> Result<Submission, CoreError> {
    let ts = text_field(data.get("ts"));
    let lang = text_field(data.get("lang"));
    let gender = text_field(data.get("gender"));
    let q1 = score_field(data.get("q1"));
    let q2 = text_field(data.get("q2"));
    let q3 = text_field(data.get("q3"));
    let q4 = text_field(data.get("q4"));
    let q5 = score_field(data.get("q5"));

    match (ts, lang, gender, q1, q2, q3, q4, q5) {
        (Some(ts), Some(lang), Some(gender), Some(q1), Some(q2), Some(q3), Some(q4), Some(q5)) => {
            Ok(Submission {
                ts,
                lang,
                gender,
                q1,
                q2,
                q3,
                q4,
                q5,
            })
        }
        (ts, lang, gender, q1, q2, q3, q4, q5) => {
            let present = [
                ts.is_some(),
                lang.is_some(),
                gender.is_some(),
                q1.is_some(),
                q2.is_some(),
                q3.is_some(),
                q4.is_some(),
                q5.is_some(),
            ];
            let fields = FIELD_ORDER
                .iter()
                .zip(present)
                .filter(|(_, ok)| !ok)
                .map(|(name, _)| *name)
                .collect();
            Err(CoreError::MissingFields { fields })
        }
    }
}

/// Normalize a required text field.
///
/// Falsy values (absent, `null`, `false`, `0`, `""`) are rejected. Truthy
/// numbers and `true` are kept in their textual form, with integral floats
/// written without a fraction (`1.0` becomes `"1"`). Arrays and objects have
/// no TEXT representation and are rejected.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => None,
            Some(f) if n.is_f64() => Some(f.to_string()),
            Some(_) => Some(n.to_string()),
            None => None,
        },
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Coerce a score field to an integer in `SCORE_MIN..=SCORE_MAX`.
///
/// Strings are trimmed and parsed as numbers (empty coerces to 0), booleans
/// map to 0/1 and `null` to 0. Fractional values are rejected because the
/// column is INTEGER.
fn score_field(value: Option<&Value>) -> Option<Score> {
    let n = match value? {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                parse_number(trimmed)?
            }
        }
        Value::Array(_) | Value::Object(_) => return None,
    };

    let in_range = n >= f64::from(SCORE_MIN) && n <= f64::from(SCORE_MAX);
    if n.is_finite() && in_range && n.fract() == 0.0 {
        Some(n as Score)
    } else {
        None
    }
}

/// Parse a trimmed numeric string. Besides decimals this accepts unsigned
/// `0x`, `0o` and `0b` integer literals, with either letter case.
fn parse_number(s: &str) -> Option<f64> {
    let radix = match s.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return s.parse().ok(),
    };

    let digits = &s[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}
