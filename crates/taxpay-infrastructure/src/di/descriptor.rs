//! Service descriptors
//!
//! A descriptor pairs a [`ServiceName`] with an async factory. Factories run
//! one after another in registration order, and each receives a
//! [`ServiceBuildContext`] exposing the configuration and every service
//! built before it.

use crate::config::{AppConfig, StorageBackend, parse_locales};
use crate::di::services::{ApiKey, ServiceHandle, ServiceKey, StorageKey};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use taxpay_domain::ServiceName;
use taxpay_domain::error::{Error, Result};
use taxpay_domain::ports::StorageProvider;
use taxpay_domain::value_objects::Locale;
use taxpay_providers::events::TokioEventBusProvider;
use taxpay_providers::http::{HttpClientConfig, ReqwestApiClient};
use taxpay_providers::language::StoredLanguageProvider;
use taxpay_providers::payment::ApiPaymentProvider;
use taxpay_providers::storage::{FileStorageProvider, MemoryStorageProvider};

type ServiceFactory =
    Arc<dyn Fn(ServiceBuildContext) -> BoxFuture<'static, Result<ServiceHandle>> + Send + Sync>;

/// What a factory can see while it runs
#[derive(Clone)]
pub struct ServiceBuildContext {
    config: Arc<AppConfig>,
    building: ServiceName,
    built: HashMap<ServiceName, ServiceHandle>,
}

impl ServiceBuildContext {
    pub(crate) fn new(
        config: Arc<AppConfig>,
        building: ServiceName,
        built: HashMap<ServiceName, ServiceHandle>,
    ) -> Self {
        Self {
            config,
            building,
            built,
        }
    }

    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The service being constructed
    pub fn building(&self) -> ServiceName {
        self.building
    }

    /// A service constructed earlier in this pass
    pub fn require_named(&self, name: ServiceName) -> Result<ServiceHandle> {
        self.built
            .get(&name)
            .cloned()
            .ok_or(Error::DependencyNotReady {
                building: self.building,
                requested: name,
            })
    }

    /// Typed form of [`require_named`](Self::require_named)
    pub fn require<K: ServiceKey>(&self) -> Result<Arc<K::Service>> {
        let handle = self.require_named(K::NAME)?;
        K::from_handle(&handle).ok_or_else(|| {
            Error::internal(format!("handle registered as {} has the wrong kind", K::NAME))
        })
    }
}

/// A named service factory
#[derive(Clone)]
pub struct ServiceDescriptor {
    name: ServiceName,
    description: String,
    factory: ServiceFactory,
}

impl ServiceDescriptor {
    /// Create a descriptor from an async factory
    pub fn new<F, Fut>(name: ServiceName, description: impl Into<String>, factory: F) -> Self
    where
        F: Fn(ServiceBuildContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ServiceHandle>> + Send + 'static,
    {
        Self {
            name,
            description: description.into(),
            factory: Arc::new(move |ctx| Box::pin(factory(ctx))),
        }
    }

    /// Create a descriptor that hands out an existing instance
    pub fn instance(handle: ServiceHandle, description: impl Into<String>) -> Self {
        let name = handle.name();
        Self::new(name, description, move |_| {
            let handle = handle.clone();
            async move { Ok(handle) }
        })
    }

    /// The service this descriptor constructs
    pub fn name(&self) -> ServiceName {
        self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn build(&self, ctx: ServiceBuildContext) -> BoxFuture<'static, Result<ServiceHandle>> {
        (self.factory)(ctx)
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Descriptors for the live services, in dependency order
///
/// Payment depends on the API client and language on storage, so both come
/// after their dependencies.
pub fn default_descriptors() -> Vec<ServiceDescriptor> {
    vec![
        ServiceDescriptor::new(
            ServiceName::Storage,
            "Key-value storage (memory or JSON file)",
            build_storage,
        ),
        ServiceDescriptor::new(ServiceName::Api, "HTTP client for the backend API", build_api),
        ServiceDescriptor::new(
            ServiceName::EventBus,
            "In-process topic event bus",
            build_event_bus,
        ),
        ServiceDescriptor::new(
            ServiceName::Payment,
            "Payment processing through the backend API",
            build_payment,
        ),
        ServiceDescriptor::new(
            ServiceName::Language,
            "Language selection persisted in storage",
            build_language,
        ),
    ]
}

async fn build_storage(ctx: ServiceBuildContext) -> Result<ServiceHandle> {
    let config = ctx.config().storage.clone();
    let storage: Arc<dyn StorageProvider> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStorageProvider::new()),
        StorageBackend::File => {
            let provider =
                tokio::task::spawn_blocking(move || FileStorageProvider::open(config.path))
                    .await
                    .map_err(|e| Error::internal(format!("Storage open task failed: {e}")))??;
            Arc::new(provider)
        }
    };
    Ok(ServiceHandle::Storage(storage))
}

async fn build_api(ctx: ServiceBuildContext) -> Result<ServiceHandle> {
    let api = &ctx.config().api;
    let mut http = HttpClientConfig::with_base_url(api.base_url.clone());
    http.timeout = api.timeout();
    if let Some(user_agent) = &api.user_agent {
        http.user_agent.clone_from(user_agent);
    }
    Ok(ServiceHandle::Api(Arc::new(ReqwestApiClient::new(http)?)))
}

async fn build_event_bus(ctx: ServiceBuildContext) -> Result<ServiceHandle> {
    let bus = TokioEventBusProvider::with_capacity(ctx.config().events.capacity);
    Ok(ServiceHandle::EventBus(Arc::new(bus)))
}

async fn build_payment(ctx: ServiceBuildContext) -> Result<ServiceHandle> {
    let api = ctx.require::<ApiKey>()?;
    let payment = ApiPaymentProvider::with_endpoint(api, ctx.config().payment.endpoint.clone());
    Ok(ServiceHandle::Payment(Arc::new(payment)))
}

async fn build_language(ctx: ServiceBuildContext) -> Result<ServiceHandle> {
    let storage = ctx.require::<StorageKey>()?;
    let config = &ctx.config().language;
    let supported = parse_locales(&config.supported)?;
    let default = Locale::parse(&config.default)?;
    let language = StoredLanguageProvider::new(storage, supported, default)?;
    Ok(ServiceHandle::Language(Arc::new(language)))
}
