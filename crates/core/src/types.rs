/// Primary keys of the `responses` table are PostgreSQL SERIAL (INTEGER).
pub type DbId = i32;

/// A Likert-style answer stored in an INTEGER column.
pub type Score = i32;

/// Lowest accepted score (inclusive).
pub const SCORE_MIN: Score = 1;

/// Highest accepted score (inclusive).
pub const SCORE_MAX: Score = 5;
