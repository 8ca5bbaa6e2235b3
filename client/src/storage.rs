//! Persistence capability for the session store.
//!
//! The store itself is storage-agnostic: it only needs `get`/`set`/
//! `remove` over string keys. In the browser the backing is the
//! `user-storage` cookie (so the server can read the same bytes); on
//! the host side [`MemoryStorage`] provides the same contract.

use std::collections::HashMap;

/// Key-value persistence the session store writes through.
pub trait StorageBackend {
    /// Read the persisted value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Delete the value under `key`. A real deletion: after this, the
    /// old value must not be readable (a logged-out cookie must not be
    /// replayable).
    fn remove(&mut self, key: &str);
}

/// In-memory backend standing in for `document.cookie` on the host.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with one value, as if a previous visit had
    /// persisted it.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.set(key, value);
        storage
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
