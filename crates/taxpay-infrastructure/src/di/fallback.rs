//! Fallback services
//!
//! Inert stand-ins published when the registry cannot be constructed.
//! Storage reads nothing and rejects writes, the API answers 503, the event
//! bus delivers to nobody, payments are declined and the language is pinned.

use crate::di::services::Services;
use std::sync::Arc;
use taxpay_domain::value_objects::Locale;
use taxpay_providers::events::NullEventBus;
use taxpay_providers::http::NullApiClient;
use taxpay_providers::language::NullLanguageProvider;
use taxpay_providers::payment::NullPaymentProvider;
use taxpay_providers::storage::NullStorageProvider;

impl Services {
    /// Fallback set pinned to the built-in default locale
    pub fn fallback() -> Self {
        Self::fallback_with_locale(Locale::default())
    }

    /// Fallback set pinned to `locale`
    pub fn fallback_with_locale(locale: Locale) -> Self {
        Self::new(
            Arc::new(NullStorageProvider::new()),
            Arc::new(NullApiClient::new()),
            Arc::new(NullEventBus::new()),
            Arc::new(NullPaymentProvider::new()),
            Arc::new(NullLanguageProvider::with_locale(locale)),
        )
    }
}
