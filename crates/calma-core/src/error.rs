use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {kind} record {id}: {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: String,
        reason: String,
    },
}
