//! Dependency injection
//!
//! | Module | Role |
//! |--------|------|
//! | [`services`] | The constructed service set and typed keys |
//! | [`descriptor`] | Named async factories |
//! | [`registry`] | One-shot construction of every service |
//! | [`fallback`] | Inert stand-ins for degraded mode |
//! | [`provider`] | Composition root publishing a context |
//! | [`accessors`] | Lookups from inside a provider scope |

pub mod accessors;
pub mod bootstrap;
pub mod descriptor;
pub mod fallback;
pub mod provider;
pub mod registry;
pub mod services;

pub use accessors::{use_named_service, use_service, use_service_mode, use_services};
pub use bootstrap::mount_app;
pub use descriptor::{ServiceBuildContext, ServiceDescriptor, default_descriptors};
pub use provider::{
    ProviderOptions, ProviderPhase, ProviderState, ServiceContext, ServiceMode, ServiceProvider,
};
pub use registry::{ConstructionFailure, ServiceRegistry, ServiceRegistryBuilder};
pub use services::{
    ApiKey, EventBusKey, LanguageKey, PaymentKey, ServiceHandle, ServiceKey, Services, StorageKey,
};
