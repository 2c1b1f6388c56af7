//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for key/value persistence.
//! Implementations can use JSON files, in-memory maps, etc.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Storage failures, kept apart from "key absent"
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed value for {key}: {reason}")]
    Malformed { key: String, reason: String },

    #[error("failed to encode {key}: {reason}")]
    Encode { key: String, reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Raw key/value persistence
///
/// `read` returns `Ok(None)` when the key was never written and
/// `Err(Malformed)` when a value exists but cannot be read back.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Retire an unreadable value so the next read sees the key as absent.
    /// Backends that can keep a copy aside should override this.
    fn set_aside(&self, key: &str) -> StorageResult<()> {
        self.remove(key)
    }
}

/// Process-local storage for tests and previews
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing encoding
    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = match self.values.lock() {
            Ok(values) => values.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        keys.sort();
        keys
    }

    fn poisoned(key: &str) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "storage lock poisoned"),
        }
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let values = self.values.lock().map_err(|_| Self::poisoned(key))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut values = self.values.lock().map_err(|_| Self::poisoned(key))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut values = self.values.lock().map_err(|_| Self::poisoned(key))?;
        values.remove(key);
        Ok(())
    }
}
