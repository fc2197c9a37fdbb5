//! In-memory storage for tests and ephemeral sessions.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::{CartStorage, StorageError};

/// `HashMap`-backed storage. Clones share the same underlying map, so a test
/// can keep a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();

        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }

        storage
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|error| StorageError::Unavailable(error.to_string()))?;

        Ok(entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|error| StorageError::Unavailable(error.to_string()))?;

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn clones_share_entries() -> TestResult {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();

        writer.save("shop/cart", "[]")?;

        assert_eq!(storage.load("shop/cart")?, Some("[]".to_string()));

        Ok(())
    }

    #[test]
    fn missing_key_loads_none() -> TestResult {
        let storage = MemoryStorage::with_entry("other", "x");

        assert_eq!(storage.load("shop/cart")?, None);

        Ok(())
    }
}
