use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionKind {
    Meditation,
    Breathing,
    Sound,
}

impl SessionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Meditation => "Meditação",
            SessionKind::Breathing => "Respiração",
            SessionKind::Sound => "Sons relaxantes",
        }
    }
}

/// A finished (or stopped) mindfulness session. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MindfulnessSessionRecord {
    pub id: Uuid,
    pub kind: SessionKind,
    pub title: String,
    /// Nominal length of the session in seconds.
    pub duration_seconds: u32,
    /// Seconds the session actually ran. Absent on records written before
    /// this field existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u32>,
    pub description: String,
    pub created_at: jiff::Timestamp,
    pub completed: bool,
}

impl MindfulnessSessionRecord {
    pub fn new(
        kind: SessionKind,
        title: impl Into<String>,
        description: impl Into<String>,
        duration_seconds: u32,
        elapsed_seconds: u32,
        completed: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            duration_seconds,
            elapsed_seconds: Some(elapsed_seconds),
            description: description.into(),
            created_at: jiff::Timestamp::now(),
            completed,
        }
    }

    /// Seconds that count toward practice totals.
    pub fn practiced_seconds(&self) -> u32 {
        self.elapsed_seconds.unwrap_or(self.duration_seconds)
    }

    fn invalid(&self, reason: impl Into<String>) -> CoreError {
        CoreError::InvalidRecord {
            kind: Self::KIND,
            id: self.id.to_string(),
            reason: reason.into(),
        }
    }
}

impl Record for MindfulnessSessionRecord {
    const KIND: &'static str = "mindfulness session";

    fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(self.invalid("empty title"));
        }
        if self.duration_seconds == 0 {
            return Err(self.invalid("zero duration"));
        }
        if let Some(elapsed) = self.elapsed_seconds
            && elapsed > self.duration_seconds
        {
            return Err(self.invalid(format!(
                "elapsed {elapsed}s exceeds duration {}s",
                self.duration_seconds
            )));
        }
        Ok(())
    }
}
