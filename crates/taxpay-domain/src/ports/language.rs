//! Language Provider Port

use crate::error::Result;
use crate::value_objects::Locale;

/// Language selection interface
pub trait LanguageProvider: Send + Sync {
    /// Currently selected locale
    fn current(&self) -> Locale;

    /// Select a locale; must be one of [`LanguageProvider::supported`]
    fn set_language(&self, locale: &Locale) -> Result<()>;

    /// Locales the application offers
    fn supported(&self) -> Vec<Locale>;

    /// Provider name for diagnostics
    fn provider_name(&self) -> &str;
}
