//! # Taxpay
//!
//! Service registry and composition root for the tourist-tax application.
//! Platform services (storage, API client, event bus, payment, language)
//! are constructed once per provider and read through typed accessors.
//!
//! ## Example
//!
//! ```ignore
//! use taxpay::infrastructure::{ConfigLoader, mount_app, use_service};
//! use taxpay::infrastructure::di::StorageKey;
//!
//! let provider = mount_app(ConfigLoader::new().load()?)?;
//! provider
//!     .scope(async {
//!         let storage = use_service::<StorageKey>()?;
//!         storage.set("reservation", "stay-42")
//!     })
//!     .await??;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, value objects and service ports
//! - `providers` - live and null implementations of every port
//! - `infrastructure` - configuration, logging, registry and provider
//! - `cli` - the `taxpay` command line

pub mod cli;

/// Domain layer - error type, value objects and service ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use taxpay_domain::*;
}

/// Provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use taxpay_providers::*;
}

/// Infrastructure layer - config, logging and DI
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use taxpay_infrastructure::*;
}

pub use domain::{Error, Result, ServiceName};
pub use infrastructure::{
    ServiceContext, ServiceMode, ServiceProvider, ServiceRegistry, Services, mount_app,
    use_named_service, use_service, use_service_mode, use_services,
};
