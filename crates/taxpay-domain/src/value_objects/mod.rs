//! Value objects shared by ports and providers

pub mod api;
pub mod event;
pub mod locale;
pub mod payment;
pub mod service;

pub use api::{ApiResponse, SERVICE_UNAVAILABLE_STATUS};
pub use event::EventMessage;
pub use locale::Locale;
pub use payment::{PaymentOutcome, PaymentRequest};
pub use service::ServiceName;
