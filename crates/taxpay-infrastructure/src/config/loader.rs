//! Configuration loader
//!
//! Merges, in increasing precedence: built-in defaults, a TOML file and
//! `TAXPAY_*` environment variables. Nested keys use a double underscore,
//! e.g. `TAXPAY_API__BASE_URL`.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};
use taxpay_domain::error::{Error, Result};
use taxpay_domain::value_objects::Locale;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            let found = config_path.exists();
            if found {
                figment = figment.merge(Toml::file(config_path));
            }
            log_config_loaded(config_path, found);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    validate_api_config(config)?;
    validate_language_config(config)?;

    if config.events.capacity == 0 {
        return Err(Error::configuration("Event bus capacity cannot be 0"));
    }
    if config.provider.init_timeout_ms == 0 {
        return Err(Error::configuration(
            "Provider initialization timeout cannot be 0",
        ));
    }
    if config.payment.endpoint.trim().is_empty() {
        return Err(Error::configuration("Payment endpoint cannot be empty"));
    }
    if config.storage.path.as_os_str().is_empty() {
        return Err(Error::configuration("Storage path cannot be empty"));
    }
    Ok(())
}

fn validate_api_config(config: &AppConfig) -> Result<()> {
    let base_url = &config.api.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(Error::configuration(format!(
            "API base URL must start with http:// or https://, got '{base_url}'"
        )));
    }
    if config.api.timeout_secs == 0 {
        return Err(Error::configuration("API timeout cannot be 0"));
    }
    Ok(())
}

fn validate_language_config(config: &AppConfig) -> Result<()> {
    let supported = parse_locales(&config.language.supported)?;
    if supported.is_empty() {
        return Err(Error::configuration("At least one locale must be supported"));
    }
    let default = Locale::parse(&config.language.default)
        .config_context("Invalid default locale")?;
    if !supported.contains(&default) {
        return Err(Error::configuration(format!(
            "Default locale '{default}' is not in the supported list"
        )));
    }
    Ok(())
}

/// Parse configured locale tags
pub fn parse_locales(tags: &[String]) -> Result<Vec<Locale>> {
    tags.iter()
        .map(|tag| Locale::parse(tag).config_context(format!("Invalid locale '{tag}'")))
        .collect()
}
