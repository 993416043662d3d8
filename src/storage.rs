//! Injected key-value persistence boundary.
//!
//! DESIGN
//! ======
//! The web client keeps everything in browser local storage. This crate
//! preserves that shape but takes the store as an explicit dependency, so
//! embedders and tests can substitute their own backing instead of reaching
//! for ambient global state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// String key-value storage with local-storage semantics: synchronous,
/// whole-value get/set, silent overwrite.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory backend, the default stand-in for local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
