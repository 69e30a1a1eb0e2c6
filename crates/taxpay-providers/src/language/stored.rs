//! Storage-backed language provider
//!
//! The selected locale is persisted through the storage service under
//! [`LANGUAGE_STORAGE_KEY`], so it survives restarts when storage does.
//! A stored value that is unparseable or no longer supported reads as the
//! default locale.

use std::sync::Arc;
use taxpay_domain::constants::LANGUAGE_STORAGE_KEY;
use taxpay_domain::error::{Error, Result};
use taxpay_domain::ports::{LanguageProvider, StorageProvider};
use taxpay_domain::value_objects::Locale;
use tracing::debug;

/// Language provider persisting the selection in storage
pub struct StoredLanguageProvider {
    storage: Arc<dyn StorageProvider>,
    supported: Vec<Locale>,
    default: Locale,
}

impl StoredLanguageProvider {
    /// Create a provider; `default` must be one of `supported`
    pub fn new(
        storage: Arc<dyn StorageProvider>,
        supported: Vec<Locale>,
        default: Locale,
    ) -> Result<Self> {
        if !supported.contains(&default) {
            return Err(Error::configuration(format!(
                "default locale '{default}' is not in the supported list"
            )));
        }
        Ok(Self {
            storage,
            supported,
            default,
        })
    }

    /// The fallback locale
    pub fn default_locale(&self) -> &Locale {
        &self.default
    }
}

impl std::fmt::Debug for StoredLanguageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredLanguageProvider")
            .field("storage", &self.storage.provider_name())
            .field("supported", &self.supported)
            .field("default", &self.default)
            .finish()
    }
}

impl LanguageProvider for StoredLanguageProvider {
    fn current(&self) -> Locale {
        self.storage
            .get(LANGUAGE_STORAGE_KEY)
            .and_then(|tag| Locale::parse(&tag).ok())
            .filter(|locale| self.supported.contains(locale))
            .unwrap_or_else(|| self.default.clone())
    }

    fn set_language(&self, locale: &Locale) -> Result<()> {
        if !self.supported.contains(locale) {
            return Err(Error::invalid_argument(format!(
                "unsupported locale '{locale}'"
            )));
        }
        self.storage.set(LANGUAGE_STORAGE_KEY, locale.as_str())?;
        debug!(%locale, "Language changed");
        Ok(())
    }

    fn supported(&self) -> Vec<Locale> {
        self.supported.clone()
    }

    fn provider_name(&self) -> &str {
        "stored"
    }
}
