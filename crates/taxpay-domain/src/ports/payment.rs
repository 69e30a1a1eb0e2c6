//! Payment Provider Port

use crate::error::Result;
use crate::value_objects::{PaymentOutcome, PaymentRequest};
use async_trait::async_trait;

/// Payment processing interface
///
/// A declined payment is `Ok` with `success == false`; `Err` is reserved for
/// invalid requests and transport failures.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Submit a payment
    async fn process_payment(&self, request: PaymentRequest) -> Result<PaymentOutcome>;

    /// Provider name for diagnostics
    fn provider_name(&self) -> &str;
}
