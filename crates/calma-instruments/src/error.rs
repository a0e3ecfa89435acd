use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstrumentError {
    #[error("unknown scale: {0}")]
    UnknownScale(String),

    #[error("scale '{scale_id}' has unanswered items at positions {missing:?}")]
    IncompleteAnswers {
        scale_id: String,
        missing: Vec<usize>,
    },

    #[error("value {value} at position {index} is not a legal option for scale '{scale_id}'")]
    InvalidAnswerValue {
        scale_id: String,
        index: usize,
        value: i32,
    },

    #[error("scale '{scale_id}' expects {expected} answers, got {actual}")]
    AnswerCount {
        scale_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("position {index} is out of range for scale '{scale_id}' ({len} items)")]
    AnswerIndex {
        scale_id: String,
        index: usize,
        len: usize,
    },

    #[error("stored score {stored} for scale '{scale_id}' does not match recomputed {computed}")]
    ScoreMismatch {
        scale_id: String,
        stored: i32,
        computed: i32,
    },

    #[error("invalid definition for scale '{scale_id}': {reason}")]
    InvalidDefinition { scale_id: String, reason: String },
}
