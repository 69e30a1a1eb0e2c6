//! API Client Provider Port

use crate::error::Result;
use crate::value_objects::ApiResponse;
use async_trait::async_trait;

/// HTTP API client interface
///
/// Paths are relative to the client's configured base URL. A response with
/// a non-2xx status is a successful call; only transport failures are errors.
#[async_trait]
pub trait ApiClientProvider: Send + Sync {
    /// Issue a GET request
    async fn get(&self, path: &str) -> Result<ApiResponse>;

    /// Issue a POST request with a JSON body
    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse>;

    /// Whether calls reach a real backend
    ///
    /// Returns `false` for null implementations.
    fn is_enabled(&self) -> bool;

    /// Provider name for diagnostics
    fn provider_name(&self) -> &str;
}
