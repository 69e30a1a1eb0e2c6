//! Structured logging with tracing
//!
//! Configures the global subscriber: human-readable or JSON output on
//! stdout, optionally mirrored to a daily rolling file.

use crate::config::LoggingConfig;
use crate::constants::LOG_ENV_FILTER;
use taxpay_domain::error::{Error, Result};
use tracing::{Level, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with the provided configuration
///
/// `TAXPAY_LOG` overrides the configured level with a full filter directive.
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_ENV_FILTER).unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
    });

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| std::path::Path::new(".")),
            path.file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("taxpay.log")),
        )
    });

    // Layer types differ between branches, hence the duplication
    let installed = if config.json_format {
        let stdout = fmt::layer().json().with_target(true);
        let registry = Registry::default().with(filter).with(stdout);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false);
            registry.with(file).try_init()
        } else {
            registry.try_init()
        }
    } else {
        let stdout = fmt::layer().with_target(true);
        let registry = Registry::default().with(filter).with(stdout);
        if let Some(appender) = file_appender {
            let file = fmt::layer().with_writer(appender).with_ansi(false);
            registry.with(file).try_init()
        } else {
            registry.try_init()
        }
    };

    installed.map_err(|e| Error::configuration(format!("Failed to install logger: {e}")))?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &std::path::Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
