//! Configuration types
//!
//! Every section has serde defaults, so a partial TOML file or a handful
//! of environment variables is a complete configuration.

use crate::constants::{
    DEFAULT_INIT_TIMEOUT_MS, DEFAULT_LOG_LEVEL, DEFAULT_STORAGE_FILENAME,
    DEFAULT_SUPPORTED_LOCALES,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use taxpay_domain::constants::DEFAULT_LOCALE;
use taxpay_providers::constants::{
    EVENT_BUS_DEFAULT_CAPACITY, HTTP_DEFAULT_BASE_URL, HTTP_DEFAULT_TIMEOUT_SECS,
    PAYMENT_DEFAULT_ENDPOINT,
};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-lifetime map
    Memory,
    /// JSON file on disk
    File,
}

/// Storage service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which backend to construct
    pub backend: StorageBackend,
    /// File location for the `file` backend
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            backend: StorageBackend::File,
            path: base
                .join(crate::constants::DEFAULT_CONFIG_DIR)
                .join(DEFAULT_STORAGE_FILENAME),
        }
    }
}

/// API client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: HTTP_DEFAULT_BASE_URL.to_string(),
            timeout_secs: HTTP_DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// Event bus configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Buffered messages per topic
    pub capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: EVENT_BUS_DEFAULT_CAPACITY,
        }
    }
}

/// Payment service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Endpoint relative to the API base URL
    pub endpoint: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            endpoint: PAYMENT_DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Language service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Locale used until the user picks one
    pub default: String,
    /// Locales the user can pick
    pub supported: Vec<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_LOCALE.to_string(),
            supported: DEFAULT_SUPPORTED_LOCALES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Service provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Budget for registry initialization before falling back
    pub init_timeout_ms: u64,
}

impl ProviderConfig {
    /// Initialization budget as a `Duration`
    pub fn init_timeout(&self) -> Duration {
        Duration::from_millis(self.init_timeout_ms)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            init_timeout_ms: DEFAULT_INIT_TIMEOUT_MS,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Storage service
    pub storage: StorageConfig,
    /// API client
    pub api: ApiConfig,
    /// Event bus
    pub events: EventBusConfig,
    /// Payment service
    pub payment: PaymentConfig,
    /// Language service
    pub language: LanguageConfig,
    /// Service provider
    pub provider: ProviderConfig,
}
