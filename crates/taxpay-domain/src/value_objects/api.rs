//! API response envelope

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP status used by inert API clients
pub const SERVICE_UNAVAILABLE_STATUS: u16 = 503;

/// Response envelope returned by every API client
///
/// Non-2xx responses are still returned as envelopes; only transport
/// failures become errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Decoded response body (`Null` when empty, a JSON string when not JSON)
    pub data: serde_json::Value,
    /// HTTP status code
    pub status: u16,
    /// Reason phrase for the status code
    pub status_text: String,
    /// Response headers (lower-cased names)
    pub headers: HashMap<String, String>,
}

impl ApiResponse {
    /// Create a response with the given status and body
    pub fn new(status: u16, status_text: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            data,
            status,
            status_text: status_text.into(),
            headers: HashMap::new(),
        }
    }

    /// Synthetic response used when the API client is degraded
    pub fn service_unavailable() -> Self {
        Self::new(
            SERVICE_UNAVAILABLE_STATUS,
            "Service Unavailable",
            serde_json::json!({ "error": "API service unavailable" }),
        )
    }

    /// Attach a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
