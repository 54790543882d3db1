//! Quiz response row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use survey_core::types::{DbId, Score};
use survey_core::validation::Submission;

/// A row from the `responses` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: DbId,
    pub ts: String,
    pub lang: String,
    pub gender: String,
    pub q1: Score,
    pub q2: String,
    pub q3: String,
    pub q4: String,
    pub q5: Score,
}

impl QuizResponse {
    /// Build the row a store would persist for `submission` under `id`.
    pub fn from_submission(id: DbId, submission: &Submission) -> Self {
        Self {
            id,
            ts: submission.ts.clone(),
            lang: submission.lang.clone(),
            gender: submission.gender.clone(),
            q1: submission.q1,
            q2: submission.q2.clone(),
            q3: submission.q3.clone(),
            q4: submission.q4.clone(),
            q5: submission.q5,
        }
    }

    /// Whether this row holds exactly the answers in `submission`.
    pub fn matches(&self, submission: &Submission) -> bool {
        *self == Self::from_submission(self.id, submission)
    }
}
