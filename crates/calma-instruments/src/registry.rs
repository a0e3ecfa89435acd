use std::collections::HashSet;

use crate::error::InstrumentError;
use crate::interpretation::{self, InterpretationBand, Threshold};
use crate::scoring::{self, ScaleDefinition};

/// Validated catalog of scale definitions.
///
/// Built once at startup and shared by reference; every definition has
/// passed [`ScaleDefinition::validate`] and ids are unique.
#[derive(Debug, Clone)]
pub struct ScaleRegistry {
    scales: Vec<ScaleDefinition>,
}

impl ScaleRegistry {
    pub fn new(scales: Vec<ScaleDefinition>) -> Result<Self, InstrumentError> {
        let mut seen = HashSet::new();
        for scale in &scales {
            scale.validate()?;
            if !seen.insert(scale.id.as_str()) {
                return Err(InstrumentError::InvalidDefinition {
                    scale_id: scale.id.clone(),
                    reason: "registered twice".to_string(),
                });
            }
        }
        tracing::debug!(count = scales.len(), "scale registry loaded");
        Ok(Self { scales })
    }

    /// Registry of the four built-in scales.
    pub fn builtin() -> Result<Self, InstrumentError> {
        Self::new(
            crate::all_scales()
                .iter()
                .map(|s| s.definition().clone())
                .collect(),
        )
    }

    pub fn get(&self, scale_id: &str) -> Result<&ScaleDefinition, InstrumentError> {
        self.scales
            .iter()
            .find(|s| s.id == scale_id)
            .ok_or_else(|| InstrumentError::UnknownScale(scale_id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScaleDefinition> {
        self.scales.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scales.iter().map(|s| s.id.as_str())
    }

    pub fn compute_score(
        &self,
        scale_id: &str,
        answers: &[Option<i32>],
    ) -> Result<i32, InstrumentError> {
        scoring::compute_score(self.get(scale_id)?, answers)
    }

    pub fn resolve_threshold(
        &self,
        scale_id: &str,
        score: i32,
    ) -> Result<&Threshold, InstrumentError> {
        let scale = self.get(scale_id)?;
        // Unreachable for validated scales, which always carry a 0 threshold.
        interpretation::matching_threshold(scale, score).ok_or_else(|| {
            InstrumentError::InvalidDefinition {
                scale_id: scale_id.to_string(),
                reason: "no band matches".to_string(),
            }
        })
    }

    pub fn resolve(
        &self,
        scale_id: &str,
        score: i32,
    ) -> Result<&InterpretationBand, InstrumentError> {
        self.resolve_threshold(scale_id, score).map(|t| &t.band)
    }
}
