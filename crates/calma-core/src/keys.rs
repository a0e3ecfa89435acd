//! Storage key conventions.
//!
//! Pure string functions. These define the canonical layout of record
//! collections in the local key-value store; every collection is a JSON
//! array stored under a single key.

pub const ASSESSMENTS_PREFIX: &str = "assessments/";

/// All responses for one scale, appended in submission order.
pub fn assessment_responses(scale_id: &str) -> String {
    format!("{ASSESSMENTS_PREFIX}{scale_id}.json")
}

pub const MINDFULNESS_SESSIONS: &str = "mindfulness/sessions.json";
