use calma_core::models::mindfulness::SessionKind;
use calma_instruments::error::InstrumentError;
use calma_storage::error::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("scale '{scale_id}' has unanswered items at positions {missing:?}")]
    IncompleteAnswers {
        scale_id: String,
        missing: Vec<usize>,
    },

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error("unknown breathing exercise: {0}")]
    UnknownExercise(String),

    #[error("invalid breathing exercise '{exercise_id}': {reason}")]
    InvalidExercise { exercise_id: String, reason: String },

    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: String,
    },

    #[error("session duration must be at least one second")]
    InvalidDuration,

    #[error("{0:?} sessions are not run by this controller")]
    UnsupportedKind(SessionKind),

    #[error("persistence error: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    pub(crate) fn transition(operation: &'static str, state: impl std::fmt::Debug) -> Self {
        SessionError::InvalidTransition {
            operation,
            state: format!("{state:?}"),
        }
    }
}
