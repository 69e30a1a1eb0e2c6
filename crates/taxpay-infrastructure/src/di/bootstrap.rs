//! Application bootstrap
//!
//! Builds the default registry from configuration and mounts a provider
//! over it.
//!
//! ```ignore
//! let config = ConfigLoader::new().load()?;
//! let provider = mount_app(config)?;
//! let ctx = provider.ready().await?;
//! ```

use crate::config::AppConfig;
use crate::di::provider::{ProviderOptions, ServiceProvider};
use crate::di::registry::ServiceRegistry;
use std::sync::Arc;
use taxpay_domain::error::Result;
use tracing::info;

/// Mount a provider over the default services
///
/// Fails when called outside a tokio runtime.
pub fn mount_app(config: AppConfig) -> Result<ServiceProvider> {
    let options = ProviderOptions::from_config(&config)?;
    let registry = Arc::new(ServiceRegistry::with_defaults(config)?);
    info!(
        services = registry.descriptors().len(),
        timeout = ?options.init_timeout,
        "Mounting service provider"
    );
    ServiceProvider::mount(registry, options)
}
