//! Null API client
//!
//! Answers every call with a synthetic `503 Service Unavailable` envelope
//! instead of failing, so callers keep their normal response handling.

use async_trait::async_trait;
use taxpay_domain::error::Result;
use taxpay_domain::ports::ApiClientProvider;
use taxpay_domain::value_objects::ApiResponse;

/// API client that never reaches a backend
#[derive(Debug, Default, Clone, Copy)]
pub struct NullApiClient;

impl NullApiClient {
    /// Create a new null API client
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ApiClientProvider for NullApiClient {
    async fn get(&self, _path: &str) -> Result<ApiResponse> {
        Ok(ApiResponse::service_unavailable())
    }

    async fn post(&self, _path: &str, _body: &serde_json::Value) -> Result<ApiResponse> {
        Ok(ApiResponse::service_unavailable())
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
