//! Durable storage for the visitor's language preference.
//!
//! Storage is best effort. Implementations report failures through
//! [`StorageError`], and the helpers below turn any failure into "no value" so
//! the rest of the pipeline never has to care.

use crate::error::StorageError;
use std::collections::HashMap;
use tracing::debug;

/// Storage key for the persisted language.
pub const PREFERENCE_KEY: &str = "site.lang";

/// A key/value store that survives page reloads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read a value, treating any storage failure as absence.
pub fn read_preference<S: PreferenceStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            debug!("Ignoring storage read failure for '{}': {}", key, e);
            None
        }
    }
}

/// Write a value, swallowing any storage failure. Returns whether it was stored.
pub fn write_preference<S: PreferenceStore + ?Sized>(store: &mut S, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            debug!("Ignoring storage write failure for '{}': {}", key, e);
            false
        }
    }
}

/// Process-local store. Lives as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store for environments without durable storage. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
