//! Service ports
//!
//! One trait per platform service. Implementations live in
//! `taxpay-providers`; the registry stores them as `Arc<dyn Trait>`.
//!
//! | Port | Service |
//! |------|---------|
//! | [`StorageProvider`] | Key-value storage |
//! | [`ApiClientProvider`] | HTTP API client |
//! | [`EventBusProvider`] | Topic pub/sub |
//! | [`PaymentProvider`] | Payment processing |
//! | [`LanguageProvider`] | Language selection |

pub mod api;
pub mod events;
pub mod language;
pub mod payment;
pub mod storage;

pub use api::ApiClientProvider;
pub use events::{EventBusProvider, EventStream};
pub use language::LanguageProvider;
pub use payment::PaymentProvider;
pub use storage::StorageProvider;
