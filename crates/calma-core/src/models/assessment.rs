use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::Record;

/// A submitted questionnaire. Immutable once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub scale_id: String,
    pub score: i32,
    /// Raw option values, one per question, in question order.
    pub answers: Vec<i32>,
    pub created_at: jiff::Timestamp,
}

impl AssessmentResponse {
    pub fn new(scale_id: impl Into<String>, score: i32, answers: Vec<i32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            scale_id: scale_id.into(),
            score,
            answers,
            created_at: jiff::Timestamp::now(),
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> CoreError {
        CoreError::InvalidRecord {
            kind: Self::KIND,
            id: self.id.to_string(),
            reason: reason.into(),
        }
    }
}

impl Record for AssessmentResponse {
    const KIND: &'static str = "assessment response";

    fn validate(&self) -> Result<(), CoreError> {
        if self.scale_id.is_empty() {
            return Err(self.invalid("empty scale id"));
        }
        if self.answers.is_empty() {
            return Err(self.invalid("no answers"));
        }
        // No scale uses negative option values; a negative entry is an
        // unanswered slot that leaked into storage.
        if let Some(position) = self.answers.iter().position(|v| *v < 0) {
            return Err(self.invalid(format!("answer {position} is unanswered")));
        }
        if self.score < 0 {
            return Err(self.invalid(format!("negative score {}", self.score)));
        }
        Ok(())
    }
}
