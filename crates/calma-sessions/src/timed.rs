use calma_core::keys;
use calma_core::models::mindfulness::{MindfulnessSessionRecord, SessionKind};
use calma_storage::records::RecordStore;
use serde::Serialize;

use crate::Tickable;
use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimedState {
    Idle,
    Running,
    Paused,
    Completed,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimedTick {
    Ignored,
    Counting { remaining: u32 },
    Completed { record: MindfulnessSessionRecord },
}

/// The session currently loaded into the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedSession {
    pub kind: SessionKind,
    pub title: String,
    pub description: String,
    pub duration_seconds: u32,
    pub remaining_seconds: u32,
}

impl TimedSession {
    pub fn elapsed_seconds(&self) -> u32 {
        self.duration_seconds - self.remaining_seconds
    }
}

/// Countdown for meditation and ambient-sound sessions.
///
/// Completion and manual stop both persist a record; the stopped record
/// carries the nominal duration plus the seconds actually run.
#[derive(Debug)]
pub struct TimedSessionController {
    store: RecordStore,
    session: Option<TimedSession>,
    state: TimedState,
}

impl TimedSessionController {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            session: None,
            state: TimedState::Idle,
        }
    }

    pub fn state(&self) -> TimedState {
        self.state
    }

    pub fn session(&self) -> Option<&TimedSession> {
        self.session.as_ref()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.remaining_seconds)
    }

    pub fn start(
        &mut self,
        kind: SessionKind,
        title: impl Into<String>,
        duration_seconds: u32,
    ) -> Result<(), SessionError> {
        if self.state != TimedState::Idle {
            return Err(SessionError::transition("start", self.state));
        }
        if kind == SessionKind::Breathing {
            return Err(SessionError::UnsupportedKind(kind));
        }
        if duration_seconds == 0 {
            return Err(SessionError::InvalidDuration);
        }

        let title = title.into();
        tracing::info!(?kind, title = %title, duration_seconds, "timed session started");
        self.session = Some(TimedSession {
            kind,
            description: describe(kind, duration_seconds),
            title,
            duration_seconds,
            remaining_seconds: duration_seconds,
        });
        self.state = TimedState::Running;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.state != TimedState::Running {
            return Err(SessionError::transition("pause", self.state));
        }
        self.state = TimedState::Paused;
        tracing::debug!(remaining = self.remaining_seconds(), "timed session paused");
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.state != TimedState::Paused {
            return Err(SessionError::transition("resume", self.state));
        }
        self.state = TimedState::Running;
        tracing::debug!(remaining = self.remaining_seconds(), "timed session resumed");
        Ok(())
    }

    /// End the session early and record it as not completed.
    pub fn stop(&mut self) -> Result<MindfulnessSessionRecord, SessionError> {
        let (TimedState::Running | TimedState::Paused, Some(session)) =
            (self.state, self.session.as_ref())
        else {
            return Err(SessionError::transition("stop", self.state));
        };

        let record = self.persist(session, false)?;
        tracing::info!(
            kind = ?session.kind,
            elapsed = session.elapsed_seconds(),
            "timed session stopped"
        );
        self.state = TimedState::Stopped;
        Ok(record)
    }

    fn persist(
        &self,
        session: &TimedSession,
        completed: bool,
    ) -> Result<MindfulnessSessionRecord, SessionError> {
        let record = MindfulnessSessionRecord::new(
            session.kind,
            session.title.clone(),
            session.description.clone(),
            session.duration_seconds,
            session.elapsed_seconds(),
            completed,
        );
        self.store.append(keys::MINDFULNESS_SESSIONS, &record)?;
        Ok(record)
    }
}

impl Tickable for TimedSessionController {
    type Event = TimedTick;

    fn tick(&mut self) -> Result<TimedTick, SessionError> {
        if self.state != TimedState::Running {
            return Ok(TimedTick::Ignored);
        }
        let Some(session) = self.session.as_ref() else {
            return Ok(TimedTick::Ignored);
        };

        let remaining = session.remaining_seconds.saturating_sub(1);
        if remaining > 0 {
            if let Some(session) = self.session.as_mut() {
                session.remaining_seconds = remaining;
            }
            return Ok(TimedTick::Counting { remaining });
        }

        let finished = TimedSession {
            remaining_seconds: 0,
            ..session.clone()
        };
        let record = self.persist(&finished, true)?;
        tracing::info!(kind = ?finished.kind, seconds = finished.duration_seconds, "timed session completed");
        self.session = Some(finished);
        self.state = TimedState::Completed;
        Ok(TimedTick::Completed { record })
    }

    /// Paused sessions stay active: the scheduler keeps ticking and the
    /// ticks are ignored until the session resumes.
    fn is_active(&self) -> bool {
        matches!(self.state, TimedState::Running | TimedState::Paused)
    }
}

fn describe(kind: SessionKind, duration_seconds: u32) -> String {
    let minutes = duration_seconds / 60;
    let seconds = duration_seconds % 60;
    match (minutes, seconds) {
        (0, s) => format!("{} de {s} segundos", kind.label()),
        (1, 0) => format!("{} de 1 minuto", kind.label()),
        (m, 0) => format!("{} de {m} minutos", kind.label()),
        (m, s) => format!("{} de {m} min {s} s", kind.label()),
    }
}
