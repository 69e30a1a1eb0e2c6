//! Event Bus Provider Port
//!
//! Topic-based publish/subscribe between consumers of the registry.

use crate::error::Result;
use crate::value_objects::EventMessage;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Boxed async stream of messages for one topic
pub type EventStream = Pin<Box<dyn Stream<Item = EventMessage> + Send + 'static>>;

/// Event bus interface
#[async_trait]
pub trait EventBusProvider: Send + Sync {
    /// Publish a payload to a topic, returning how many subscribers received it
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<usize>;

    /// Subscribe to one topic
    ///
    /// The stream yields only messages published to `topic` after the call.
    async fn subscribe(&self, topic: &str) -> Result<EventStream>;

    /// Check if there are any active subscribers
    fn has_subscribers(&self) -> bool;

    /// Provider name for diagnostics
    fn provider_name(&self) -> &str;
}
