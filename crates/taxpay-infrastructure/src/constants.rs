//! Infrastructure constants

// ============================================================================
// Configuration
// ============================================================================

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "TAXPAY";

/// Separator between nested keys in environment variables
/// (`TAXPAY_PROVIDER__INIT_TIMEOUT_MS` → `provider.init_timeout_ms`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "taxpay.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "taxpay";

// ============================================================================
// Logging
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "TAXPAY_LOG";

// ============================================================================
// Services
// ============================================================================

/// Default budget for registry initialization
pub const DEFAULT_INIT_TIMEOUT_MS: u64 = 10_000;

/// Default storage file name inside the data directory
pub const DEFAULT_STORAGE_FILENAME: &str = "storage.json";

/// Locales offered when none are configured
pub const DEFAULT_SUPPORTED_LOCALES: &[&str] = &["pl", "en", "de", "fr", "it"];
