//! HTTP API clients

pub mod client;
pub mod null;

pub use client::{HttpClientConfig, ReqwestApiClient};
pub use null::NullApiClient;
