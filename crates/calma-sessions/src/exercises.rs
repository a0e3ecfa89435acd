//! Paced-breathing exercise definitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::SessionError;

/// One timed segment of a breathing cycle (inhale, hold, exhale).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Phase {
    pub name: String,
    pub duration_seconds: u32,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BreathingExercise {
    pub id: String,
    pub name: String,
    pub description: String,
    pub phases: Vec<Phase>,
    /// Full traversals of `phases`.
    pub cycles: u32,
    pub benefits: Vec<String>,
}

impl BreathingExercise {
    pub fn cycle_seconds(&self) -> u32 {
        self.checked_cycle_seconds().unwrap_or(u32::MAX)
    }

    /// Fixed length of a completed run. Saturates for exercises that
    /// [`BreathingExercise::validate`] would reject.
    pub fn total_seconds(&self) -> u32 {
        self.checked_total_seconds().unwrap_or(u32::MAX)
    }

    fn checked_cycle_seconds(&self) -> Option<u32> {
        self.phases
            .iter()
            .try_fold(0u32, |acc, p| acc.checked_add(p.duration_seconds))
    }

    fn checked_total_seconds(&self) -> Option<u32> {
        self.checked_cycle_seconds()?.checked_mul(self.cycles)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        let invalid = |reason: String| SessionError::InvalidExercise {
            exercise_id: self.id.clone(),
            reason,
        };
        if self.phases.is_empty() {
            return Err(invalid("no phases".to_string()));
        }
        if let Some(phase) = self.phases.iter().find(|p| p.duration_seconds == 0) {
            return Err(invalid(format!("phase '{}' has zero duration", phase.name)));
        }
        if self.cycles == 0 {
            return Err(invalid("zero cycles".to_string()));
        }
        if self.checked_total_seconds().is_none() {
            return Err(invalid("total duration overflows".to_string()));
        }
        Ok(())
    }
}

/// Validated set of breathing exercises.
#[derive(Debug, Clone)]
pub struct BreathingCatalog {
    exercises: Vec<BreathingExercise>,
}

impl BreathingCatalog {
    pub fn new(exercises: Vec<BreathingExercise>) -> Result<Self, SessionError> {
        let mut seen = HashSet::new();
        for exercise in &exercises {
            exercise.validate()?;
            if !seen.insert(exercise.id.as_str()) {
                return Err(SessionError::InvalidExercise {
                    exercise_id: exercise.id.clone(),
                    reason: "registered twice".to_string(),
                });
            }
        }
        Ok(Self { exercises })
    }

    pub fn builtin() -> Result<Self, SessionError> {
        Self::new(builtin_exercises().to_vec())
    }

    pub fn all(&self) -> &[BreathingExercise] {
        &self.exercises
    }

    pub fn get(&self, id: &str) -> Result<&BreathingExercise, SessionError> {
        self.exercises
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| SessionError::UnknownExercise(id.to_string()))
    }
}

fn phase(name: &str, duration_seconds: u32, instruction: &str) -> Phase {
    Phase {
        name: name.to_string(),
        duration_seconds,
        instruction: instruction.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_exercises() -> &'static [BreathingExercise] {
    static EXERCISES: std::sync::LazyLock<Vec<BreathingExercise>> =
        std::sync::LazyLock::new(|| {
            vec![
                BreathingExercise {
                    id: "4-7-8".to_string(),
                    name: "Respiração 4-7-8".to_string(),
                    description: "Inspire por 4 segundos, segure por 7 e expire por 8.".to_string(),
                    phases: vec![
                        phase("Inspire", 4, "Inspire pelo nariz"),
                        phase("Segure", 7, "Segure o ar"),
                        phase("Expire", 8, "Expire pela boca"),
                    ],
                    cycles: 4,
                    benefits: strings(&[
                        "Reduz a ansiedade",
                        "Ajuda a adormecer",
                        "Acalma o sistema nervoso",
                    ]),
                },
                BreathingExercise {
                    id: "box".to_string(),
                    name: "Respiração Quadrada".to_string(),
                    description: "Quatro tempos iguais: inspire, segure, expire, segure."
                        .to_string(),
                    phases: vec![
                        phase("Inspire", 4, "Inspire lentamente"),
                        phase("Segure", 4, "Segure com os pulmões cheios"),
                        phase("Expire", 4, "Expire lentamente"),
                        phase("Segure", 4, "Segure com os pulmões vazios"),
                    ],
                    cycles: 4,
                    benefits: strings(&[
                        "Melhora a concentração",
                        "Reduz o estresse",
                    ]),
                },
                BreathingExercise {
                    id: "coherent".to_string(),
                    name: "Respiração Coerente".to_string(),
                    description: "Cinco segundos para inspirar, cinco para expirar."
                        .to_string(),
                    phases: vec![
                        phase("Inspire", 5, "Inspire suavemente"),
                        phase("Expire", 5, "Expire suavemente"),
                    ],
                    cycles: 6,
                    benefits: strings(&[
                        "Equilibra a frequência cardíaca",
                        "Promove relaxamento",
                    ]),
                },
            ]
        });
    &EXERCISES
}
