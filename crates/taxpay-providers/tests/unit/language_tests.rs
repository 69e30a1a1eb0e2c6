//! Language provider tests

use std::sync::Arc;
use taxpay_domain::Error;
use taxpay_domain::constants::LANGUAGE_STORAGE_KEY;
use taxpay_domain::ports::{LanguageProvider, StorageProvider};
use taxpay_domain::value_objects::Locale;
use taxpay_providers::language::{NullLanguageProvider, StoredLanguageProvider};
use taxpay_providers::storage::MemoryStorageProvider;

fn locales(tags: &[&str]) -> Vec<Locale> {
    tags.iter().map(|t| Locale::parse(t).unwrap()).collect()
}

#[test]
fn test_default_must_be_supported() {
    let storage = Arc::new(MemoryStorageProvider::new());
    let result = StoredLanguageProvider::new(
        storage,
        locales(&["de", "en"]),
        Locale::parse("fr").unwrap(),
    );
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_selection_is_persisted_in_storage() {
    let storage = Arc::new(MemoryStorageProvider::new());
    let provider = StoredLanguageProvider::new(
        storage.clone(),
        locales(&["de", "en", "it"]),
        Locale::parse("de").unwrap(),
    )
    .unwrap();

    assert_eq!(provider.current().as_str(), "de");
    provider.set_language(&Locale::parse("it").unwrap()).unwrap();
    assert_eq!(provider.current().as_str(), "it");
    assert_eq!(storage.get(LANGUAGE_STORAGE_KEY).as_deref(), Some("it"));
}

#[test]
fn test_unsupported_selection_is_rejected() {
    let storage = Arc::new(MemoryStorageProvider::new());
    let provider =
        StoredLanguageProvider::new(storage, locales(&["en"]), Locale::parse("en").unwrap())
            .unwrap();

    let err = provider
        .set_language(&Locale::parse("ja").unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_stale_stored_value_reads_as_default() {
    let storage = Arc::new(MemoryStorageProvider::new());
    storage.set(LANGUAGE_STORAGE_KEY, "xx-not-a-tag").unwrap();
    let provider = StoredLanguageProvider::new(
        storage.clone(),
        locales(&["en", "de"]),
        Locale::parse("en").unwrap(),
    )
    .unwrap();
    assert_eq!(provider.current().as_str(), "en");

    storage.set(LANGUAGE_STORAGE_KEY, "fr").unwrap();
    assert_eq!(provider.current().as_str(), "en");
}

#[test]
fn test_null_language_is_pinned() {
    let provider = NullLanguageProvider::new();
    assert_eq!(provider.current().as_str(), "en");
    assert_eq!(provider.supported().len(), 1);
    assert!(matches!(
        provider.set_language(&Locale::parse("de").unwrap()),
        Err(Error::ServiceUnavailable { .. })
    ));
}
