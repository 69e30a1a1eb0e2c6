//! Null payment provider
//!
//! Declines every payment without contacting anything.

use async_trait::async_trait;
use taxpay_domain::error::Result;
use taxpay_domain::ports::PaymentProvider;
use taxpay_domain::value_objects::{PaymentOutcome, PaymentRequest};

/// Payment provider that never charges
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPaymentProvider;

impl NullPaymentProvider {
    /// Create a new null payment provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProvider for NullPaymentProvider {
    async fn process_payment(&self, _request: PaymentRequest) -> Result<PaymentOutcome> {
        Ok(PaymentOutcome::failed("payment service unavailable"))
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
