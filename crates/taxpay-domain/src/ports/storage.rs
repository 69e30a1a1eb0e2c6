//! Storage Provider Port
//!
//! Synchronous, string-keyed, string-valued persistent storage.
//! Reads never fail: a missing key, or a degraded store, reads as `None`.

use crate::error::Result;

/// Key-value storage interface
///
/// All implementations must be `Send + Sync`; the registry shares one
/// instance across every consumer.
pub trait StorageProvider: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value, returning whether it existed
    fn remove(&self, key: &str) -> Result<bool>;

    /// Remove every value
    fn clear(&self) -> Result<()>;

    /// All stored keys, sorted
    fn keys(&self) -> Vec<String>;

    /// Provider name for diagnostics
    fn provider_name(&self) -> &str;
}
