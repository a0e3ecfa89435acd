use calma_core::keys;
use calma_core::models::mindfulness::{MindfulnessSessionRecord, SessionKind};
use calma_storage::records::RecordStore;
use serde::Serialize;

use crate::Tickable;
use crate::error::SessionError;
use crate::exercises::{BreathingExercise, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BreathingState {
    Idle,
    Running {
        phase_index: usize,
        /// Zero-based cycle currently being breathed.
        cycle: u32,
        /// Seconds left in the current phase, always at least 1.
        remaining: u32,
    },
    Completed,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BreathingTick {
    Ignored,
    Counting {
        remaining: u32,
    },
    PhaseChanged {
        phase_index: usize,
        cycle: u32,
        remaining: u32,
    },
    Completed {
        record: MindfulnessSessionRecord,
    },
}

/// Paced breathing through an exercise's phases for a fixed number of
/// cycles.
///
/// Only a natural completion is persisted; a stopped run leaves no record.
#[derive(Debug)]
pub struct BreathingSessionMachine {
    store: RecordStore,
    exercise: Option<BreathingExercise>,
    state: BreathingState,
}

impl BreathingSessionMachine {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            exercise: None,
            state: BreathingState::Idle,
        }
    }

    pub fn state(&self) -> BreathingState {
        self.state
    }

    pub fn exercise(&self) -> Option<&BreathingExercise> {
        self.exercise.as_ref()
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        match self.state {
            BreathingState::Running { phase_index, .. } => self
                .exercise
                .as_ref()
                .and_then(|e| e.phases.get(phase_index)),
            _ => None,
        }
    }

    pub fn start(&mut self, exercise: &BreathingExercise) -> Result<(), SessionError> {
        if self.state != BreathingState::Idle {
            return Err(SessionError::transition("start", self.state));
        }
        exercise.validate()?;

        self.state = BreathingState::Running {
            phase_index: 0,
            cycle: 0,
            remaining: exercise.phases[0].duration_seconds,
        };
        self.exercise = Some(exercise.clone());
        tracing::info!(exercise_id = %exercise.id, cycles = exercise.cycles, "breathing started");
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), SessionError> {
        let BreathingState::Running { phase_index, cycle, .. } = self.state else {
            return Err(SessionError::transition("stop", self.state));
        };
        self.state = BreathingState::Stopped;
        tracing::info!(phase_index, cycle, "breathing stopped early, nothing recorded");
        Ok(())
    }

    fn complete(&self, exercise: &BreathingExercise) -> Result<MindfulnessSessionRecord, SessionError> {
        let total = exercise.total_seconds();
        let record = MindfulnessSessionRecord::new(
            SessionKind::Breathing,
            exercise.name.clone(),
            exercise.description.clone(),
            total,
            total,
            true,
        );
        self.store.append(keys::MINDFULNESS_SESSIONS, &record)?;
        Ok(record)
    }
}

impl Tickable for BreathingSessionMachine {
    type Event = BreathingTick;

    fn tick(&mut self) -> Result<BreathingTick, SessionError> {
        let (BreathingState::Running { phase_index, cycle, remaining }, Some(exercise)) =
            (self.state, self.exercise.as_ref())
        else {
            return Ok(BreathingTick::Ignored);
        };

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.state = BreathingState::Running {
                phase_index,
                cycle,
                remaining,
            };
            return Ok(BreathingTick::Counting { remaining });
        }

        let next_phase = (phase_index + 1) % exercise.phases.len();
        let next_cycle = if next_phase == 0 { cycle + 1 } else { cycle };

        if next_cycle == exercise.cycles {
            // Persist before committing so a failed save leaves the last
            // second pending and the tick can be retried.
            let record = self.complete(exercise)?;
            tracing::info!(
                exercise_id = %exercise.id,
                seconds = record.duration_seconds,
                "breathing completed"
            );
            self.state = BreathingState::Completed;
            return Ok(BreathingTick::Completed { record });
        }

        let remaining = exercise.phases[next_phase].duration_seconds;
        tracing::debug!(phase_index = next_phase, cycle = next_cycle, "breathing phase");
        self.state = BreathingState::Running {
            phase_index: next_phase,
            cycle: next_cycle,
            remaining,
        };
        Ok(BreathingTick::PhaseChanged {
            phase_index: next_phase,
            cycle: next_cycle,
            remaining,
        })
    }

    fn is_active(&self) -> bool {
        matches!(self.state, BreathingState::Running { .. })
    }
}
