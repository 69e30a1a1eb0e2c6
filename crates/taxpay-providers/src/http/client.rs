//! Reqwest API client
//!
//! Resolves request paths against a configured base URL and folds every
//! HTTP response into an [`ApiResponse`] envelope. Only transport failures
//! (connection refused, timeout, invalid URL) become errors.

use crate::constants::{HTTP_DEFAULT_BASE_URL, HTTP_DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use taxpay_domain::error::{Error, Result};
use taxpay_domain::ports::ApiClientProvider;
use taxpay_domain::value_objects::ApiResponse;
use tracing::debug;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Base URL every request path is resolved against
    pub base_url: String,
    /// Total timeout for requests
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: HTTP_DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(HTTP_DEFAULT_TIMEOUT_SECS),
            user_agent: format!("taxpay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create configuration for a base URL with default timeout
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// API client backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    client: Client,
    config: HttpClientConfig,
}

impl ReqwestApiClient {
    /// Build a client from configuration
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(Error::configuration(format!(
                "API base URL must be http(s), got '{}'",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::network_with_source("Failed to build HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// Client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Absolute URL for a request path
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn into_envelope(response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::network_with_source("Failed to read response body", e))?;

        let data = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&body).into_owned())
            })
        };

        Ok(ApiResponse {
            data,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
        })
    }
}

#[async_trait]
impl ApiClientProvider for ReqwestApiClient {
    async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = self.url_for(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("GET {url} failed"), e))?;
        Self::into_envelope(response).await
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse> {
        let url = self.url_for(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::network_with_source(format!("POST {url} failed"), e))?;
        Self::into_envelope(response).await
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &str {
        "reqwest"
    }
}
