//! # Storage Backend
//!
//! The durable key-value adapter the store persists through.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     StorageBackend Contract                             │
//! │                                                                         │
//! │  load(key)   → Some(json) | None        (absent key is not an error)   │
//! │  save(key, json)                                                        │
//! │  remove(key)                            (absent key is a no-op)        │
//! │                                                                         │
//! │  Values are opaque JSON blobs. The backend never inspects them.        │
//! │                                                                         │
//! │  ┌──────────────┐      ┌──────────────────────────────────┐            │
//! │  │ FileStorage  │      │ grocerease_products.json          │            │
//! │  │ (one file    │ ───► │ grocerease_orders.json            │            │
//! │  │  per key)    │      │ grocerease_settings.json          │            │
//! │  └──────────────┘      └──────────────────────────────────┘            │
//! │                                                                         │
//! │  ┌──────────────┐                                                       │
//! │  │MemoryStorage │  HashMap behind a mutex - for tests                  │
//! │  └──────────────┘                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Trait
// =============================================================================

/// Durable key-value store of opaque JSON strings.
pub trait StorageBackend: Send + Sync + Debug {
    /// Loads the value under `key`. Absent keys return `Ok(None)`.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Saves `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// File Storage
// =============================================================================

/// File-backed storage: one `<key>.json` file per key under a data
/// directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a file storage rooted at `dir`, creating the directory if
    /// needed.
    pub fn new(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::WriteFailed {
            key: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(FileStorage { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(key = %key, bytes = value.len(), "Saving key");
        fs::write(self.path(key), value).map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage for tests.
///
/// `set_fail_writes(true)` makes every save fail, for exercising the
/// write-failure reporting path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Pre-populates a key, e.g. with corrupt JSON for fallback tests.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Toggles simulated write failures.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: "simulated write failure".to_string(),
            });
        }
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
