use std::collections::BTreeSet;

use calma_core::models::assessment::AssessmentResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InstrumentError;
use crate::interpretation::Threshold;

/// One selectable answer, shared by every question of a scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub value: i32,
    pub label: String,
}

/// Question text. Its position in the scale is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub text: String,
}

/// Which end of the score range is the concerning one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Polarity {
    /// Anxiety, depression, stress: a high total is a warning sign.
    HigherIsWorse,
    /// Well-being: a low total is a warning sign.
    HigherIsBetter,
}

/// Immutable definition of a self-report scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub options: Vec<AnswerOption>,
    /// Zero-based positions scored as `max_option_value - raw`.
    pub reversed_items: BTreeSet<usize>,
    /// Minimum cumulative score → band, highest threshold first.
    pub thresholds: Vec<Threshold>,
    pub polarity: Polarity,
}

impl ScaleDefinition {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn min_option_value(&self) -> i32 {
        self.options.iter().map(|o| o.value).min().unwrap_or(0)
    }

    pub fn max_option_value(&self) -> i32 {
        self.options.iter().map(|o| o.value).max().unwrap_or(0)
    }

    pub fn is_legal_value(&self, value: i32) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn option_label(&self, value: i32) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    /// Lowest attainable total: every item contributes its smallest
    /// transformed value.
    pub fn min_score(&self) -> i32 {
        let lo = self.min_option_value();
        (0..self.len())
            .map(|i| if self.reversed_items.contains(&i) { 0 } else { lo })
            .sum()
    }

    pub fn max_score(&self) -> i32 {
        let (lo, hi) = (self.min_option_value(), self.max_option_value());
        (0..self.len())
            .map(|i| if self.reversed_items.contains(&i) { hi - lo } else { hi })
            .sum()
    }

    /// Check the structural invariants every registered scale must hold.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        let invalid = |reason: String| InstrumentError::InvalidDefinition {
            scale_id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("empty id".to_string()));
        }
        if self.questions.is_empty() {
            return Err(invalid("no questions".to_string()));
        }
        if self.options.is_empty() {
            return Err(invalid("no answer options".to_string()));
        }

        let mut values = BTreeSet::new();
        for option in &self.options {
            if option.value < 0 {
                return Err(invalid(format!("negative option value {}", option.value)));
            }
            if !values.insert(option.value) {
                return Err(invalid(format!("duplicate option value {}", option.value)));
            }
        }

        if let Some(index) = self.reversed_items.iter().find(|i| **i >= self.len()) {
            return Err(invalid(format!(
                "reversed item {index} beyond {} questions",
                self.len()
            )));
        }

        let mut minimums = BTreeSet::new();
        for threshold in &self.thresholds {
            if threshold.min_score < 0 {
                return Err(invalid(format!("negative threshold {}", threshold.min_score)));
            }
            if !minimums.insert(threshold.min_score) {
                return Err(invalid(format!(
                    "duplicate threshold {}",
                    threshold.min_score
                )));
            }
        }
        if !minimums.contains(&0) {
            return Err(invalid("no fallback band at threshold 0".to_string()));
        }

        Ok(())
    }
}

/// Sum an answer set, inverting reversed items.
///
/// `None` marks an unanswered item; any `None` fails with
/// [`InstrumentError::IncompleteAnswers`] listing every missing position.
pub fn compute_score(
    scale: &ScaleDefinition,
    answers: &[Option<i32>],
) -> Result<i32, InstrumentError> {
    if answers.len() != scale.len() {
        return Err(InstrumentError::AnswerCount {
            scale_id: scale.id.clone(),
            expected: scale.len(),
            actual: answers.len(),
        });
    }

    let missing: Vec<usize> = answers
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_none())
        .map(|(i, _)| i)
        .collect();
    if !missing.is_empty() {
        return Err(InstrumentError::IncompleteAnswers {
            scale_id: scale.id.clone(),
            missing,
        });
    }

    let max = scale.max_option_value();
    let mut total = 0;
    for (index, value) in answers.iter().flatten().copied().enumerate() {
        if !scale.is_legal_value(value) {
            return Err(InstrumentError::InvalidAnswerValue {
                scale_id: scale.id.clone(),
                index,
                value,
            });
        }
        total += if scale.reversed_items.contains(&index) {
            max - value
        } else {
            value
        };
    }
    Ok(total)
}

/// Check a stored response against the scale it claims to belong to.
///
/// Recomputes the score from the raw answers so a record whose total was
/// tampered with, or scored under a different definition, is caught.
pub fn validate_response(
    scale: &ScaleDefinition,
    response: &AssessmentResponse,
) -> Result<(), InstrumentError> {
    if response.scale_id != scale.id {
        return Err(InstrumentError::UnknownScale(response.scale_id.clone()));
    }
    let answers: Vec<Option<i32>> = response.answers.iter().map(|v| Some(*v)).collect();
    let score = compute_score(scale, &answers)?;
    if score != response.score {
        return Err(InstrumentError::ScoreMismatch {
            scale_id: scale.id.clone(),
            stored: response.score,
            computed: score,
        });
    }
    Ok(())
}
