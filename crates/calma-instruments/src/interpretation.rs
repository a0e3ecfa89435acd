use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{Polarity, ScaleDefinition};

/// How a band should be presented. Display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BandTone {
    Positive,
    Neutral,
    Caution,
    Alert,
}

/// A named level assigned to a score range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterpretationBand {
    pub level: String,
    pub description: String,
    pub tone: BandTone,
}

/// Lower bound (inclusive) of a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Threshold {
    pub min_score: i32,
    pub band: InterpretationBand,
}

/// The threshold with the largest `min_score` not above `score`.
///
/// Scores below every threshold fall back to the threshold-0 band.
pub fn matching_threshold(scale: &ScaleDefinition, score: i32) -> Option<&Threshold> {
    scale
        .thresholds
        .iter()
        .filter(|t| t.min_score <= score)
        .max_by_key(|t| t.min_score)
        .or_else(|| scale.thresholds.iter().find(|t| t.min_score == 0))
}

pub fn resolve(scale: &ScaleDefinition, score: i32) -> Option<&InterpretationBand> {
    matching_threshold(scale, score).map(|t| &t.band)
}

/// The band that should prompt the user toward emergency resources.
pub fn most_severe_threshold(scale: &ScaleDefinition) -> Option<&Threshold> {
    match scale.polarity {
        Polarity::HigherIsWorse => scale.thresholds.iter().max_by_key(|t| t.min_score),
        Polarity::HigherIsBetter => scale.thresholds.iter().min_by_key(|t| t.min_score),
    }
}

pub fn is_most_severe(scale: &ScaleDefinition, threshold: &Threshold) -> bool {
    most_severe_threshold(scale).is_some_and(|t| t.min_score == threshold.min_score)
}
