use std::fmt;
use std::sync::Arc;

use calma_core::models::Record;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;
use crate::store::{KeyValueStore, MemoryStore};

/// Typed, append-only record collections over a [`KeyValueStore`].
///
/// Each key holds a JSON array of one record type. Cheap to clone; every
/// clone shares the same underlying store.
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore").finish_non_exhaustive()
    }
}

impl RecordStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Load every valid record stored under `key`.
    ///
    /// A missing key is an empty collection. Entries that do not match the
    /// record shape, or fail [`Record::validate`], are dropped with a warning;
    /// a value that is not a JSON array at all is [`StorageError::Corrupt`].
    pub fn load<T>(&self, key: &str) -> Result<Vec<T>, StorageError>
    where
        T: Record + DeserializeOwned,
    {
        let entries = self.read_entries(key)?;

        let total = entries.len();
        let mut records = Vec::with_capacity(total);
        for (position, entry) in entries.into_iter().enumerate() {
            let record: T = match serde_json::from_value(entry) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(key, position, kind = T::KIND, error = %e, "dropping malformed record");
                    continue;
                }
            };
            if let Err(e) = record.validate() {
                tracing::warn!(key, position, error = %e, "dropping invalid record");
                continue;
            }
            records.push(record);
        }

        if records.len() < total {
            tracing::warn!(key, kept = records.len(), total, "some stored records were rejected");
        }
        Ok(records)
    }

    /// Replace the collection under `key`.
    pub fn save<T>(&self, key: &str, records: &[T]) -> Result<(), StorageError>
    where
        T: Record + Serialize,
    {
        let json = serde_json::to_string_pretty(records)?;
        self.inner.write(key, &json)
    }

    /// Append one record and return the new collection length.
    ///
    /// The record is validated before anything is written. Stored entries
    /// that [`RecordStore::load`] would drop are kept as they are.
    pub fn append<T>(&self, key: &str, record: &T) -> Result<usize, StorageError>
    where
        T: Record + Serialize,
    {
        if let Err(e) = record.validate() {
            tracing::warn!(key, error = %e, "refusing to persist invalid record");
            return Err(e.into());
        }

        // Existing entries are carried over untouched, including ones this
        // build cannot read. Filtering happens on the load path only.
        let mut entries = self.read_entries(key)?;
        entries.push(serde_json::to_value(record)?);
        let json = serde_json::to_string_pretty(&entries)?;
        self.inner.write(key, &json)?;
        tracing::debug!(key, kind = T::KIND, count = entries.len(), "record appended");
        Ok(entries.len())
    }

    /// The raw JSON array stored under `key`, empty when the key is missing.
    fn read_entries(&self, key: &str) -> Result<Vec<serde_json::Value>, StorageError> {
        let Some(contents) = self.inner.read(key)? else {
            return Ok(Vec::new());
        };

        let json: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
            tracing::warn!(key, error = %e, "stored value is not valid JSON");
            StorageError::Corrupt {
                key: key.to_string(),
            }
        })?;
        match json {
            serde_json::Value::Array(entries) => Ok(entries),
            _ => Err(StorageError::Corrupt {
                key: key.to_string(),
            }),
        }
    }

    /// Delete a whole collection. Records are never removed individually.
    pub fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)?;
        tracing::info!(key, "collection cleared");
        Ok(())
    }
}
