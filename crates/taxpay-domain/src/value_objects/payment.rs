//! Payment value objects

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A tourist-tax payment to submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Reservation or stay the tax is paid for
    pub reference: String,
    /// Amount in minor currency units (cents)
    pub amount_minor: u64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Payer e-mail for the receipt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_email: Option<String>,
}

impl PaymentRequest {
    /// Create a payment request
    pub fn new(reference: impl Into<String>, amount_minor: u64, currency: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            amount_minor,
            currency: currency.into(),
            payer_email: None,
        }
    }

    /// Set the payer e-mail
    pub fn with_payer_email(mut self, email: impl Into<String>) -> Self {
        self.payer_email = Some(email.into());
        self
    }

    /// Check the request before it leaves the process
    pub fn validate(&self) -> Result<()> {
        if self.reference.trim().is_empty() {
            return Err(Error::invalid_argument("payment reference cannot be empty"));
        }
        if self.amount_minor == 0 {
            return Err(Error::invalid_argument("payment amount must be positive"));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Error::invalid_argument(format!(
                "currency must be a 3-letter ISO code, got '{}'",
                self.currency
            )));
        }
        if let Some(email) = &self.payer_email
            && !email.contains('@')
        {
            return Err(Error::invalid_argument(format!("invalid payer e-mail '{email}'")));
        }
        Ok(())
    }
}

/// Result of a payment attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    /// Whether the payment went through
    pub success: bool,
    /// Gateway transaction id, present on success
    pub transaction_id: Option<String>,
    /// Human-readable detail
    pub message: String,
}

impl PaymentOutcome {
    /// Successful payment
    pub fn succeeded(transaction_id: impl Into<String>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id.into()),
            message: "payment accepted".to_string(),
        }
    }

    /// Declined or failed payment
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            message: message.into(),
        }
    }
}
