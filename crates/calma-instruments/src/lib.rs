//! calma-instruments
//!
//! Self-assessment scale definitions. Pure data and pure functions: the
//! questions, answer options, item-reversal rules and interpretation
//! thresholds of each supported scale, plus scoring and band resolution.

pub mod error;
pub mod instruments;
pub mod interpretation;
pub mod registry;
pub mod scoring;

use scoring::ScaleDefinition;

/// Trait implemented by each built-in self-assessment scale.
pub trait Scale: Send + Sync {
    /// The full immutable definition.
    fn definition(&self) -> &ScaleDefinition;

    /// Unique identifier (e.g., "gad7", "pss10").
    fn id(&self) -> &str {
        &self.definition().id
    }

    /// Human-readable name.
    fn name(&self) -> &str {
        &self.definition().name
    }
}

/// Return all built-in scales.
pub fn all_scales() -> Vec<Box<dyn Scale>> {
    vec![
        Box::new(instruments::gad7::Gad7),
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::pss10::Pss10),
        Box::new(instruments::swls::Swls),
    ]
}

/// Look up a built-in scale by ID.
pub fn get_scale(id: &str) -> Option<Box<dyn Scale>> {
    all_scales().into_iter().find(|s| s.id() == id)
}
