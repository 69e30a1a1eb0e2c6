//! Configuration loader tests

use std::time::Duration;
use taxpay_domain::Error;
use taxpay_domain::value_objects::Locale;
use taxpay_infrastructure::config::{
    AppConfig, ConfigLoader, StorageBackend, parse_locales, validate_app_config,
};
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("taxpay.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_default_config_is_valid() {
    let config = AppConfig::default();
    validate_app_config(&config).unwrap();

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.storage.backend, StorageBackend::File);
    assert_eq!(config.api.timeout(), Duration::from_secs(30));
    assert_eq!(config.provider.init_timeout(), Duration::from_secs(10));
    assert_eq!(config.language.default, "pl");
    assert!(config.language.supported.contains(&"de".to_string()));
}

#[test]
fn test_default_locale_is_polish_and_supported() {
    let config = AppConfig::default();
    let supported = parse_locales(&config.language.supported).unwrap();
    assert_eq!(supported.first().map(Locale::as_str), Some("pl"));
    assert!(supported.iter().any(|l| l.as_str() == "en"));
    assert_eq!(Locale::parse(&config.language.default).unwrap(), Locale::default());
}

#[test]
fn test_load_merges_toml_over_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[api]
base_url = "https://tax.example.org/api"

[storage]
backend = "memory"

[provider]
init_timeout_ms = 250
"#,
    );

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();

    assert_eq!(config.api.base_url, "https://tax.example.org/api");
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.provider.init_timeout_ms, 250);
    // Untouched sections keep their defaults
    assert_eq!(config.events.capacity, 1024);
    assert_eq!(config.payment.endpoint, "payments");
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new().with_config_path(dir.path().join("absent.toml"));

    let config = loader.load().unwrap();
    assert_eq!(config.api.base_url, AppConfig::default().api.base_url);
    assert!(loader.config_path().is_some());
}

#[test]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[events]\ncapacity = 8\n");

    // SAFETY: the prefix is unique to this test, no other code reads these variables
    unsafe {
        std::env::set_var("TAXPAYCFGTEST_EVENTS__CAPACITY", "16");
        std::env::set_var("TAXPAYCFGTEST_LANGUAGE__DEFAULT", "de");
    }

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("TAXPAYCFGTEST")
        .load()
        .unwrap();

    assert_eq!(config.events.capacity, 16);
    assert_eq!(config.language.default, "de");
}

#[test]
fn test_invalid_log_level_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"loud\"\n");

    let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = AppConfig::default();
    config.provider.init_timeout_ms = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.events.capacity = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.api.base_url = "ftp://tax.example.org".to_string();
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.language.default = "es".to_string();
    let err = validate_app_config(&config).unwrap_err();
    assert!(err.to_string().contains("not in the supported list"));

    let mut config = AppConfig::default();
    config.language.supported = vec!["en".to_string(), "not a locale".to_string()];
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_save_to_file_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = AppConfig::default();
    config.api.base_url = "http://127.0.0.1:9000".to_string();
    config.storage.backend = StorageBackend::Memory;
    config.language.default = "fr".to_string();

    let loader = ConfigLoader::new().with_config_path(&path);
    loader.save_to_file(&config, &path).unwrap();
    let loaded = loader.load().unwrap();

    assert_eq!(loaded.api.base_url, "http://127.0.0.1:9000");
    assert_eq!(loaded.storage.backend, StorageBackend::Memory);
    assert_eq!(loaded.language.default, "fr");
}
