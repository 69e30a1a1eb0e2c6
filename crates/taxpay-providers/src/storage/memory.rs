//! In-memory storage provider
//!
//! Backed by a concurrent `DashMap`. Nothing survives the process; use
//! [`FileStorageProvider`](super::FileStorageProvider) for persistence.

use dashmap::DashMap;
use taxpay_domain::error::Result;
use taxpay_domain::ports::StorageProvider;

/// Storage provider that keeps values in memory
#[derive(Debug, Default)]
pub struct MemoryStorageProvider {
    entries: DashMap<String, String>,
}

impl MemoryStorageProvider {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn clear(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
