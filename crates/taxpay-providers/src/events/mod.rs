//! Event bus providers

pub mod null;
pub mod tokio;

pub use self::tokio::TokioEventBusProvider;
pub use null::NullEventBus;
