//! Constructed service set
//!
//! [`Services`] holds exactly one instance per [`ServiceName`]. It is only
//! ever assembled whole, either by the registry or by
//! [`Services::fallback`](crate::di::fallback), never partially.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use taxpay_domain::ServiceName;
use taxpay_domain::error::{Error, Result};
use taxpay_domain::ports::{
    ApiClientProvider, EventBusProvider, LanguageProvider, PaymentProvider, StorageProvider,
};

/// One constructed service, tagged with its kind
#[derive(Clone)]
pub enum ServiceHandle {
    /// Key-value storage
    Storage(Arc<dyn StorageProvider>),
    /// HTTP API client
    Api(Arc<dyn ApiClientProvider>),
    /// Event bus
    EventBus(Arc<dyn EventBusProvider>),
    /// Payment processing
    Payment(Arc<dyn PaymentProvider>),
    /// Language selection
    Language(Arc<dyn LanguageProvider>),
}

impl ServiceHandle {
    /// The service this handle implements
    pub fn name(&self) -> ServiceName {
        match self {
            Self::Storage(_) => ServiceName::Storage,
            Self::Api(_) => ServiceName::Api,
            Self::EventBus(_) => ServiceName::EventBus,
            Self::Payment(_) => ServiceName::Payment,
            Self::Language(_) => ServiceName::Language,
        }
    }

    /// Name of the implementation behind the handle
    pub fn provider_name(&self) -> &str {
        match self {
            Self::Storage(s) => s.provider_name(),
            Self::Api(s) => s.provider_name(),
            Self::EventBus(s) => s.provider_name(),
            Self::Payment(s) => s.provider_name(),
            Self::Language(s) => s.provider_name(),
        }
    }

    /// Whether both handles point at the same instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Storage(a), Self::Storage(b)) => Arc::ptr_eq(a, b),
            (Self::Api(a), Self::Api(b)) => Arc::ptr_eq(a, b),
            (Self::EventBus(a), Self::EventBus(b)) => Arc::ptr_eq(a, b),
            (Self::Payment(a), Self::Payment(b)) => Arc::ptr_eq(a, b),
            (Self::Language(a), Self::Language(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Storage service, if this is one
    pub fn as_storage(&self) -> Option<&Arc<dyn StorageProvider>> {
        match self {
            Self::Storage(s) => Some(s),
            _ => None,
        }
    }

    /// API client, if this is one
    pub fn as_api(&self) -> Option<&Arc<dyn ApiClientProvider>> {
        match self {
            Self::Api(s) => Some(s),
            _ => None,
        }
    }

    /// Event bus, if this is one
    pub fn as_event_bus(&self) -> Option<&Arc<dyn EventBusProvider>> {
        match self {
            Self::EventBus(s) => Some(s),
            _ => None,
        }
    }

    /// Payment service, if this is one
    pub fn as_payment(&self) -> Option<&Arc<dyn PaymentProvider>> {
        match self {
            Self::Payment(s) => Some(s),
            _ => None,
        }
    }

    /// Language service, if this is one
    pub fn as_language(&self) -> Option<&Arc<dyn LanguageProvider>> {
        match self {
            Self::Language(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(self.name().as_str())
            .field(&self.provider_name())
            .finish()
    }
}

/// Type-level name of a service, for typed lookups
///
/// Implemented by the zero-sized keys [`StorageKey`], [`ApiKey`],
/// [`EventBusKey`], [`PaymentKey`] and [`LanguageKey`].
pub trait ServiceKey {
    /// The port trait object the key resolves to
    type Service: ?Sized + Send + Sync;

    /// The runtime name of the service
    const NAME: ServiceName;

    /// Borrow the service out of a full set
    fn select(services: &Services) -> &Arc<Self::Service>;

    /// Unwrap a handle of the matching kind
    fn from_handle(handle: &ServiceHandle) -> Option<Arc<Self::Service>>;
}

macro_rules! service_key {
    ($(#[$meta:meta])* $key:ident => $variant:ident, $field:ident, $port:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub enum $key {}

        impl ServiceKey for $key {
            type Service = dyn $port;

            const NAME: ServiceName = ServiceName::$variant;

            fn select(services: &Services) -> &Arc<Self::Service> {
                &services.$field
            }

            fn from_handle(handle: &ServiceHandle) -> Option<Arc<Self::Service>> {
                match handle {
                    ServiceHandle::$variant(service) => Some(Arc::clone(service)),
                    _ => None,
                }
            }
        }
    };
}

service_key!(
    /// Key for the storage service
    StorageKey => Storage, storage, StorageProvider
);
service_key!(
    /// Key for the API client
    ApiKey => Api, api, ApiClientProvider
);
service_key!(
    /// Key for the event bus
    EventBusKey => EventBus, event_bus, EventBusProvider
);
service_key!(
    /// Key for the payment service
    PaymentKey => Payment, payment, PaymentProvider
);
service_key!(
    /// Key for the language service
    LanguageKey => Language, language, LanguageProvider
);

/// A complete set of constructed services
#[derive(Clone)]
pub struct Services {
    storage: Arc<dyn StorageProvider>,
    api: Arc<dyn ApiClientProvider>,
    event_bus: Arc<dyn EventBusProvider>,
    payment: Arc<dyn PaymentProvider>,
    language: Arc<dyn LanguageProvider>,
}

impl Services {
    /// Assemble a set from one instance of each service
    pub fn new(
        storage: Arc<dyn StorageProvider>,
        api: Arc<dyn ApiClientProvider>,
        event_bus: Arc<dyn EventBusProvider>,
        payment: Arc<dyn PaymentProvider>,
        language: Arc<dyn LanguageProvider>,
    ) -> Self {
        Self {
            storage,
            api,
            event_bus,
            payment,
            language,
        }
    }

    /// Assemble a set from handles
    ///
    /// Every service must appear exactly once.
    pub fn from_handles(handles: impl IntoIterator<Item = ServiceHandle>) -> Result<Self> {
        let mut by_name = HashMap::new();
        for handle in handles {
            let name = handle.name();
            if by_name.insert(name, handle).is_some() {
                return Err(Error::DuplicateService { service: name });
            }
        }
        Self::assemble(by_name)
            .map_err(|missing| Error::construction(missing, "no instance provided"))
    }

    /// Assemble from a name-indexed map, reporting the first missing service
    pub(crate) fn assemble(
        mut handles: HashMap<ServiceName, ServiceHandle>,
    ) -> std::result::Result<Self, ServiceName> {
        let mut take = |name: ServiceName| handles.remove(&name).ok_or(name);

        let storage = take(ServiceName::Storage)?;
        let api = take(ServiceName::Api)?;
        let event_bus = take(ServiceName::EventBus)?;
        let payment = take(ServiceName::Payment)?;
        let language = take(ServiceName::Language)?;

        match (storage, api, event_bus, payment, language) {
            (
                ServiceHandle::Storage(storage),
                ServiceHandle::Api(api),
                ServiceHandle::EventBus(event_bus),
                ServiceHandle::Payment(payment),
                ServiceHandle::Language(language),
            ) => Ok(Self::new(storage, api, event_bus, payment, language)),
            // Map keys are taken from `ServiceHandle::name`, so the kinds line up
            (storage, ..) => Err(storage.name()),
        }
    }

    /// Handle for one service
    pub fn get(&self, name: ServiceName) -> ServiceHandle {
        match name {
            ServiceName::Storage => ServiceHandle::Storage(Arc::clone(&self.storage)),
            ServiceName::Api => ServiceHandle::Api(Arc::clone(&self.api)),
            ServiceName::EventBus => ServiceHandle::EventBus(Arc::clone(&self.event_bus)),
            ServiceName::Payment => ServiceHandle::Payment(Arc::clone(&self.payment)),
            ServiceName::Language => ServiceHandle::Language(Arc::clone(&self.language)),
        }
    }

    /// Typed access by key
    pub fn service<K: ServiceKey>(&self) -> Arc<K::Service> {
        Arc::clone(K::select(self))
    }

    /// Storage service
    pub fn storage(&self) -> &Arc<dyn StorageProvider> {
        &self.storage
    }

    /// API client
    pub fn api(&self) -> &Arc<dyn ApiClientProvider> {
        &self.api
    }

    /// Event bus
    pub fn event_bus(&self) -> &Arc<dyn EventBusProvider> {
        &self.event_bus
    }

    /// Payment service
    pub fn payment(&self) -> &Arc<dyn PaymentProvider> {
        &self.payment
    }

    /// Language service
    pub fn language(&self) -> &Arc<dyn LanguageProvider> {
        &self.language
    }

    /// Implementation name of every service, in [`ServiceName::ALL`] order
    pub fn provider_names(&self) -> Vec<(ServiceName, String)> {
        ServiceName::ALL
            .into_iter()
            .map(|name| (name, self.get(name).provider_name().to_string()))
            .collect()
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("storage", &self.storage.provider_name())
            .field("api", &self.api.provider_name())
            .field("event_bus", &self.event_bus.provider_name())
            .field("payment", &self.payment.provider_name())
            .field("language", &self.language.provider_name())
            .finish()
    }
}
