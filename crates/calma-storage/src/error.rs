use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key: {key}")]
    InvalidKey { key: String },

    #[error("stored value under {key} is not a record collection")]
    Corrupt { key: String },

    #[error("record rejected: {0}")]
    InvalidRecord(#[from] calma_core::error::CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store lock poisoned")]
    Poisoned,
}
