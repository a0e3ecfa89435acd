#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use calma_storage::error::StorageError;
use calma_storage::records::RecordStore;
use calma_storage::store::{KeyValueStore, MemoryStore};

/// Memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

pub fn flaky() -> (Arc<FlakyStore>, RecordStore) {
    let backing = Arc::new(FlakyStore::default());
    let store = RecordStore::new(backing.clone());
    (backing, store)
}
