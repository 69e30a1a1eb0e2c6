//! Application configuration

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, parse_locales, validate_app_config};
pub use types::{
    ApiConfig, AppConfig, EventBusConfig, LanguageConfig, LoggingConfig, PaymentConfig,
    ProviderConfig, StorageBackend, StorageConfig,
};
