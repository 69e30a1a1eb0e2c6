//! Null storage provider
//!
//! Inert stand-in used when the registry falls back. Reads find nothing,
//! writes report [`Error::ServiceUnavailable`].

use taxpay_domain::ServiceName;
use taxpay_domain::error::{Error, Result};
use taxpay_domain::ports::StorageProvider;

/// Storage provider that stores nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStorageProvider;

impl NullStorageProvider {
    /// Create a new null storage provider
    pub fn new() -> Self {
        Self
    }
}

impl StorageProvider for NullStorageProvider {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::ServiceUnavailable {
            service: ServiceName::Storage,
        })
    }

    fn remove(&self, _key: &str) -> Result<bool> {
        Err(Error::ServiceUnavailable {
            service: ServiceName::Storage,
        })
    }

    fn clear(&self) -> Result<()> {
        Err(Error::ServiceUnavailable {
            service: ServiceName::Storage,
        })
    }

    fn keys(&self) -> Vec<String> {
        Vec::new()
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
