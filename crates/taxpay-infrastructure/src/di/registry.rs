//! Service registry
//!
//! Holds the singleton instance of every platform service for one
//! composition root. Construction happens at most once per registry: the
//! outcome of the first [`ServiceRegistry::initialize`] call, success or
//! failure, is memoized and shared with every later or concurrent caller.
//!
//! ```text
//! ServiceRegistryBuilder ──build──▶ ServiceRegistry ──initialize──▶ Arc<Services>
//!   register/replace                 OnceCell<Result<..>>              (frozen)
//! ```

use crate::config::AppConfig;
use crate::di::descriptor::{ServiceBuildContext, ServiceDescriptor, default_descriptors};
use crate::di::services::{ServiceHandle, Services};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use taxpay_domain::ServiceName;
use taxpay_domain::error::{Error, Result};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Memoized reason a construction pass failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionFailure {
    /// The service whose factory failed
    pub service: ServiceName,
    /// Rendered cause
    pub message: String,
}

impl ConstructionFailure {
    fn new(service: ServiceName, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
        }
    }

    /// The failure as a domain error
    pub fn to_error(&self) -> Error {
        Error::construction(self.service, self.message.clone())
    }
}

type Outcome = std::result::Result<Arc<Services>, ConstructionFailure>;

/// Builder collecting descriptors for a [`ServiceRegistry`]
#[derive(Debug)]
pub struct ServiceRegistryBuilder {
    config: Arc<AppConfig>,
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceRegistryBuilder {
    /// Add the live descriptors for every service
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.descriptors.extend(default_descriptors());
        self
    }

    /// Append a descriptor
    ///
    /// Registering the same service twice is reported by [`build`](Self::build).
    #[must_use]
    pub fn register(mut self, descriptor: ServiceDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Swap the descriptor for a service, keeping its position
    ///
    /// Appends when no descriptor for that service exists yet.
    #[must_use]
    pub fn replace(mut self, descriptor: ServiceDescriptor) -> Self {
        match self
            .descriptors
            .iter_mut()
            .find(|existing| existing.name() == descriptor.name())
        {
            Some(existing) => *existing = descriptor,
            None => self.descriptors.push(descriptor),
        }
        self
    }

    /// Validate descriptor names and create the registry
    pub fn build(self) -> Result<ServiceRegistry> {
        let mut seen = HashSet::new();
        for descriptor in &self.descriptors {
            if !seen.insert(descriptor.name()) {
                return Err(Error::DuplicateService {
                    service: descriptor.name(),
                });
            }
        }

        Ok(ServiceRegistry {
            config: self.config,
            descriptors: self.descriptors,
            outcome: OnceCell::new(),
            passes: AtomicUsize::new(0),
        })
    }
}

/// Holder of the constructed services for one composition root
pub struct ServiceRegistry {
    config: Arc<AppConfig>,
    descriptors: Vec<ServiceDescriptor>,
    outcome: OnceCell<Outcome>,
    passes: AtomicUsize,
}

impl ServiceRegistry {
    /// Start a registry with no descriptors
    pub fn builder(config: AppConfig) -> ServiceRegistryBuilder {
        ServiceRegistryBuilder {
            config: Arc::new(config),
            descriptors: Vec::new(),
        }
    }

    /// Registry with the live descriptor for every service
    pub fn with_defaults(config: AppConfig) -> Result<Self> {
        Self::builder(config).with_defaults().build()
    }

    /// Construct every service, once
    ///
    /// Concurrent callers wait for the same pass. Later callers get the
    /// memoized outcome without constructing anything.
    pub async fn initialize(&self) -> Result<Arc<Services>> {
        self.outcome
            .get_or_init(|| self.construct())
            .await
            .clone()
            .map_err(|failure| failure.to_error())
    }

    async fn construct(&self) -> Outcome {
        let pass = self.passes.fetch_add(1, Ordering::SeqCst) + 1;
        let started = Instant::now();
        debug!(pass, services = self.descriptors.len(), "Constructing services");

        let mut built: HashMap<ServiceName, ServiceHandle> = HashMap::new();
        for descriptor in &self.descriptors {
            let name = descriptor.name();
            let ctx = ServiceBuildContext::new(Arc::clone(&self.config), name, built.clone());

            let handle = descriptor.build(ctx).await.map_err(|e| {
                warn!(service = %name, error = %e, "Service construction failed");
                ConstructionFailure::new(name, e.to_string())
            })?;

            if handle.name() != name {
                return Err(ConstructionFailure::new(
                    name,
                    format!("factory returned a {} instance", handle.name()),
                ));
            }

            debug!(service = %name, provider = handle.provider_name(), "Service constructed");
            built.insert(name, handle);
        }

        let services = Services::assemble(built)
            .map_err(|missing| ConstructionFailure::new(missing, "no descriptor registered"))?;

        info!(elapsed = ?started.elapsed(), "Service registry initialized");
        Ok(Arc::new(services))
    }

    fn lookup(&self, requested: Option<ServiceName>) -> Result<Arc<Services>> {
        match self.outcome.get() {
            None => Err(Error::NotInitialized { service: requested }),
            Some(Ok(services)) => Ok(Arc::clone(services)),
            Some(Err(failure)) => Err(failure.to_error()),
        }
    }

    /// The instance bound to a service
    pub fn get(&self, name: ServiceName) -> Result<ServiceHandle> {
        Ok(self.lookup(Some(name))?.get(name))
    }

    /// Lookup by canonical string name, e.g. `"StorageService"`
    pub fn get_by_name(&self, name: &str) -> Result<ServiceHandle> {
        self.get(name.parse()?)
    }

    /// The full constructed set
    pub fn services(&self) -> Result<Arc<Services>> {
        self.lookup(None)
    }

    /// Whether a service can be fetched right now
    ///
    /// Never triggers construction.
    pub fn is_available(&self, name: ServiceName) -> bool {
        self.get(name).is_ok()
    }

    /// Whether a construction pass has finished, successfully or not
    pub fn is_initialized(&self) -> bool {
        self.outcome.initialized()
    }

    /// Number of construction passes started
    pub fn construction_passes(&self) -> usize {
        self.passes.load(Ordering::SeqCst)
    }

    /// Registered descriptors, in construction order
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    /// Configuration handed to factories
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("descriptors", &self.descriptors)
            .field("initialized", &self.is_initialized())
            .field("passes", &self.construction_passes())
            .finish_non_exhaustive()
    }
}
