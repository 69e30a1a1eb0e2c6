//! Null Event Bus
//!
//! Discards every published message; subscriptions end immediately.

use async_trait::async_trait;
use futures::stream;
use taxpay_domain::error::Result;
use taxpay_domain::ports::{EventBusProvider, EventStream};

/// Event bus that delivers nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventBus;

impl NullEventBus {
    /// Create a new null event bus
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventBusProvider for NullEventBus {
    async fn publish(&self, _topic: &str, _payload: serde_json::Value) -> Result<usize> {
        Ok(0)
    }

    async fn subscribe(&self, _topic: &str) -> Result<EventStream> {
        Ok(Box::pin(stream::empty()))
    }

    fn has_subscribers(&self) -> bool {
        false
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
