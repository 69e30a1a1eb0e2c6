//! API-backed payment provider
//!
//! Submits validated payment requests through the registry's API client.
//! The gateway contract is a JSON POST answered with
//! `{ "transactionId": "...", "success": bool?, "message": string? }`.

use crate::constants::PAYMENT_DEFAULT_ENDPOINT;
use async_trait::async_trait;
use std::sync::Arc;
use taxpay_domain::error::{Error, Result};
use taxpay_domain::ports::{ApiClientProvider, PaymentProvider};
use taxpay_domain::value_objects::{PaymentOutcome, PaymentRequest};
use tracing::{info, warn};

/// Payment provider that posts to the backend payment endpoint
pub struct ApiPaymentProvider {
    api: Arc<dyn ApiClientProvider>,
    endpoint: String,
}

impl ApiPaymentProvider {
    /// Create a provider posting to the default endpoint
    pub fn new(api: Arc<dyn ApiClientProvider>) -> Self {
        Self::with_endpoint(api, PAYMENT_DEFAULT_ENDPOINT)
    }

    /// Create a provider posting to a custom endpoint
    pub fn with_endpoint(api: Arc<dyn ApiClientProvider>, endpoint: impl Into<String>) -> Self {
        Self {
            api,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint payments are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for ApiPaymentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiPaymentProvider")
            .field("api", &self.api.provider_name())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl PaymentProvider for ApiPaymentProvider {
    async fn process_payment(&self, request: PaymentRequest) -> Result<PaymentOutcome> {
        request.validate()?;

        let mut body = serde_json::to_value(&request)?;
        body["idempotencyKey"] = serde_json::Value::String(uuid::Uuid::new_v4().to_string());

        let response = self.api.post(&self.endpoint, &body).await?;
        let message = response
            .data
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        if !response.is_success() {
            warn!(
                reference = %request.reference,
                status = response.status,
                "Payment rejected by gateway"
            );
            return Ok(PaymentOutcome::failed(message.unwrap_or_else(|| {
                format!("gateway returned {} {}", response.status, response.status_text)
            })));
        }

        if response.data.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            return Ok(PaymentOutcome::failed(
                message.unwrap_or_else(|| "payment declined".to_string()),
            ));
        }

        let transaction_id = response
            .data
            .get("transactionId")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| Error::payment("gateway response is missing transactionId"))?;

        info!(reference = %request.reference, transaction_id, "Payment accepted");
        Ok(PaymentOutcome::succeeded(transaction_id))
    }

    fn provider_name(&self) -> &str {
        "api"
    }
}
