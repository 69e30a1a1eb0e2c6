//! Null language provider
//!
//! Pinned to one locale; selecting another reports the service as
//! unavailable.

use taxpay_domain::ServiceName;
use taxpay_domain::error::{Error, Result};
use taxpay_domain::ports::LanguageProvider;
use taxpay_domain::value_objects::Locale;

/// Language provider fixed to a single locale
#[derive(Debug, Clone)]
pub struct NullLanguageProvider {
    locale: Locale,
}

impl NullLanguageProvider {
    /// Create a provider pinned to the built-in default locale
    pub fn new() -> Self {
        Self {
            locale: Locale::default(),
        }
    }

    /// Create a provider pinned to `locale`
    pub fn with_locale(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Default for NullLanguageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageProvider for NullLanguageProvider {
    fn current(&self) -> Locale {
        self.locale.clone()
    }

    fn set_language(&self, _locale: &Locale) -> Result<()> {
        Err(Error::ServiceUnavailable {
            service: ServiceName::Language,
        })
    }

    fn supported(&self) -> Vec<Locale> {
        vec![self.locale.clone()]
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
