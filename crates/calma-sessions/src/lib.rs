//! calma-sessions
//!
//! Stateful controllers driven by user intents and a one-second tick:
//! questionnaire sessions, paced breathing, and timed meditation/sound
//! sessions. None of them owns a timer; the host calls [`Tickable::tick`].

pub mod assessment;
pub mod breathing;
pub mod error;
pub mod exercises;
pub mod history;
pub mod stats;
pub mod timed;

use error::SessionError;

/// A controller advanced by an external one-second scheduler.
pub trait Tickable: Send {
    /// What a single tick produced, for the view to render.
    type Event: Send;

    /// Advance by one elapsed second. Ticks outside a running state are
    /// ignored rather than rejected.
    fn tick(&mut self) -> Result<Self::Event, SessionError>;

    /// Whether the controller can still consume ticks. Once this is false
    /// the scheduler must tear down its recurring registration.
    fn is_active(&self) -> bool;
}
