//! # Infrastructure Layer
//!
//! Configuration, logging and the dependency injection scheme that wires
//! the platform services into the application.
//!
//! ```text
//! AppConfig ─▶ ServiceRegistry ─▶ ServiceProvider ─▶ ServiceContext ─▶ use_service::<K>()
//!  (figment)    (descriptors)      (mount/unmount)     (live|degraded)    (task-local scope)
//! ```

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use di::{
    ServiceContext, ServiceMode, ServiceProvider, ServiceRegistry, Services, mount_app,
    use_named_service, use_service, use_service_mode, use_services,
};
