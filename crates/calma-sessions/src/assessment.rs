use calma_core::keys;
use calma_core::models::assessment::AssessmentResponse;
use calma_instruments::error::InstrumentError;
use calma_instruments::interpretation::{self, InterpretationBand};
use calma_instruments::registry::ScaleRegistry;
use calma_instruments::scoring::{self, ScaleDefinition};
use calma_storage::records::RecordStore;
use serde::Serialize;

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentState {
    NotStarted,
    InProgress,
    Completed,
}

/// What a successful submission returns to the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentOutcome {
    pub score: i32,
    /// Lower bound of the matched band.
    pub threshold: i32,
    pub band: InterpretationBand,
    /// The band is the most severe the scale defines. The view may offer
    /// emergency resources; nothing here navigates.
    pub escalate: bool,
    pub response: AssessmentResponse,
}

/// An in-progress questionnaire.
///
/// Nothing is persisted until [`submit`](Self::submit) succeeds; dropping
/// the session abandons it.
#[derive(Debug)]
pub struct AssessmentSession {
    store: RecordStore,
    scale: Option<ScaleDefinition>,
    answers: Vec<Option<i32>>,
    state: AssessmentState,
}

impl AssessmentSession {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            scale: None,
            answers: Vec::new(),
            state: AssessmentState::NotStarted,
        }
    }

    pub fn state(&self) -> AssessmentState {
        self.state
    }

    pub fn scale(&self) -> Option<&ScaleDefinition> {
        self.scale.as_ref()
    }

    /// Current answers; `None` marks an unanswered item.
    pub fn answers(&self) -> &[Option<i32>] {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Fraction of items answered, from 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        if self.answers.is_empty() {
            return 0.0;
        }
        self.answered_count() as f64 / self.answers.len() as f64
    }

    pub fn missing(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn start(&mut self, registry: &ScaleRegistry, scale_id: &str) -> Result<(), SessionError> {
        if self.state != AssessmentState::NotStarted {
            return Err(SessionError::transition("start", self.state));
        }
        let scale = registry.get(scale_id)?.clone();
        self.answers = vec![None; scale.len()];
        self.scale = Some(scale);
        self.state = AssessmentState::InProgress;
        tracing::debug!(scale_id, "assessment started");
        Ok(())
    }

    /// Record the answer for item `index` and return the new progress.
    pub fn answer(&mut self, index: usize, value: i32) -> Result<f64, SessionError> {
        let scale = self.in_progress("answer")?;
        if index >= scale.len() {
            return Err(InstrumentError::AnswerIndex {
                scale_id: scale.id.clone(),
                index,
                len: scale.len(),
            }
            .into());
        }
        if !scale.is_legal_value(value) {
            return Err(InstrumentError::InvalidAnswerValue {
                scale_id: scale.id.clone(),
                index,
                value,
            }
            .into());
        }
        self.answers[index] = Some(value);
        Ok(self.progress())
    }

    /// Score, interpret and persist the completed questionnaire.
    ///
    /// Fails with [`SessionError::IncompleteAnswers`] while any item is
    /// unanswered. On any failure the session stays in progress with its
    /// answers intact.
    pub fn submit(&mut self) -> Result<AssessmentOutcome, SessionError> {
        let scale = self.in_progress("submit")?;

        let missing = self.missing();
        if !missing.is_empty() {
            return Err(SessionError::IncompleteAnswers {
                scale_id: scale.id.clone(),
                missing,
            });
        }

        let score = scoring::compute_score(scale, &self.answers)?;
        let threshold = interpretation::matching_threshold(scale, score).ok_or_else(|| {
            InstrumentError::InvalidDefinition {
                scale_id: scale.id.clone(),
                reason: "no band matches".to_string(),
            }
        })?;
        let escalate = interpretation::is_most_severe(scale, threshold);

        let raw: Vec<i32> = self.answers.iter().flatten().copied().collect();
        let response = AssessmentResponse::new(scale.id.clone(), score, raw);
        self.store
            .append(&keys::assessment_responses(&scale.id), &response)?;

        let outcome = AssessmentOutcome {
            score,
            threshold: threshold.min_score,
            band: threshold.band.clone(),
            escalate,
            response,
        };

        tracing::info!(
            scale_id = %scale.id,
            score,
            level = %outcome.band.level,
            escalate,
            "assessment submitted"
        );
        self.state = AssessmentState::Completed;
        Ok(outcome)
    }

    fn in_progress(&self, operation: &'static str) -> Result<&ScaleDefinition, SessionError> {
        match (&self.state, &self.scale) {
            (AssessmentState::InProgress, Some(scale)) => Ok(scale),
            _ => Err(SessionError::transition(operation, self.state)),
        }
    }
}
