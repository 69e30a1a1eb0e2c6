//! Payment providers

pub mod api;
pub mod null;

pub use api::ApiPaymentProvider;
pub use null::NullPaymentProvider;
