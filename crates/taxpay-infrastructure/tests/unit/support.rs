//! Shared fixtures

use std::sync::Arc;
use std::time::Duration;
use taxpay_domain::ServiceName;
use taxpay_domain::error::Error;
use taxpay_infrastructure::config::{AppConfig, StorageBackend};
use taxpay_infrastructure::di::{ServiceDescriptor, ServiceHandle, ServiceRegistry};
use taxpay_providers::storage::MemoryStorageProvider;
use tokio::sync::Notify;

/// Defaults with in-memory storage, so nothing touches the filesystem
pub fn memory_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    config
}

pub fn memory_registry() -> ServiceRegistry {
    ServiceRegistry::with_defaults(memory_config()).unwrap()
}

pub fn registry_with(descriptor: ServiceDescriptor) -> ServiceRegistry {
    ServiceRegistry::builder(memory_config())
        .with_defaults()
        .replace(descriptor)
        .build()
        .unwrap()
}

pub fn failing(name: ServiceName) -> ServiceDescriptor {
    ServiceDescriptor::new(name, "always fails", move |_| async move {
        Err::<ServiceHandle, Error>(Error::internal(format!("{name} backend offline")))
    })
}

/// Storage that only finishes once `gate` is notified
pub fn gated_storage(gate: Arc<Notify>) -> ServiceDescriptor {
    ServiceDescriptor::new(ServiceName::Storage, "gated storage", move |_| {
        let gate = Arc::clone(&gate);
        async move {
            gate.notified().await;
            Ok::<_, Error>(ServiceHandle::Storage(Arc::new(MemoryStorageProvider::new())))
        }
    })
}

/// Storage that takes `delay` to construct
pub fn slow_storage(delay: Duration) -> ServiceDescriptor {
    ServiceDescriptor::new(ServiceName::Storage, "slow storage", move |_| async move {
        tokio::time::sleep(delay).await;
        Ok::<_, Error>(ServiceHandle::Storage(Arc::new(MemoryStorageProvider::new())))
    })
}
