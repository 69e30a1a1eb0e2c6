//! Tokio Broadcast Event Bus Provider
//!
//! In-process topic pub/sub. Each topic owns a broadcast channel created on
//! first subscription; publishing to a topic nobody listens to is a no-op.
//! Topics whose streams have all been dropped are pruned on the next
//! publish to that topic or the next subscribe.
//!
//! ## Example
//!
//! ```ignore
//! use taxpay_providers::events::TokioEventBusProvider;
//!
//! let bus = TokioEventBusProvider::new();
//! let mut stream = bus.subscribe("payments.completed").await?;
//! bus.publish("payments.completed", serde_json::json!({"id": "tx-1"})).await?;
//! ```

use crate::constants::EVENT_BUS_DEFAULT_CAPACITY;
use async_trait::async_trait;
use dashmap::DashMap;
use futures::stream;
use taxpay_domain::error::Result;
use taxpay_domain::ports::{EventBusProvider, EventStream};
use taxpay_domain::value_objects::EventMessage;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Event bus provider using one tokio broadcast channel per topic
///
/// ## Capacity
///
/// When a topic's channel is full, the oldest messages are dropped and
/// slow subscribers skip ahead.
pub struct TokioEventBusProvider {
    topics: DashMap<String, broadcast::Sender<EventMessage>>,
    capacity: usize,
}

impl TokioEventBusProvider {
    /// Create a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(EVENT_BUS_DEFAULT_CAPACITY)
    }

    /// Create with custom per-topic capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            topics: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Number of live subscribers on a topic
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .get(topic)
            .map_or(0, |sender| sender.receiver_count())
    }

    /// Number of topics currently holding a channel
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    fn prune_idle_topics(&self) {
        let before = self.topics.len();
        self.topics.retain(|_, sender| sender.receiver_count() > 0);
        let pruned = before.saturating_sub(self.topics.len());
        if pruned > 0 {
            debug!(pruned, "Pruned idle event topics");
        }
    }
}

impl Default for TokioEventBusProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokioEventBusProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioEventBusProvider")
            .field("capacity", &self.capacity)
            .field("topics", &self.topics.len())
            .finish()
    }
}

#[async_trait]
impl EventBusProvider for TokioEventBusProvider {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<usize> {
        let Some(sender) = self.topics.get(topic).map(|s| s.value().clone()) else {
            debug!(topic, "Published event but topic has no subscribers");
            return Ok(0);
        };

        match sender.send(EventMessage::new(topic, payload)) {
            Ok(count) => {
                debug!(topic, count, "Published event");
                Ok(count)
            }
            Err(_) => {
                debug!(topic, "Published event but no subscribers");
                self.topics
                    .remove_if(topic, |_, sender| sender.receiver_count() == 0);
                Ok(0)
            }
        }
    }

    async fn subscribe(&self, topic: &str) -> Result<EventStream> {
        self.prune_idle_topics();

        // The receiver is created under the shard lock, so a concurrent
        // prune cannot remove this topic before it is counted
        let receiver = self
            .topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe();

        let topic = topic.to_string();
        let stream = stream::unfold(receiver, move |mut rx| {
            let topic = topic.clone();
            async move {
                loop {
                    match rx.recv().await {
                        Ok(message) => return Some((message, rx)),
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            warn!(%topic, "Event stream lagged by {} events", n);
                        }
                        Err(broadcast::error::RecvError::Closed) => return None,
                    }
                }
            }
        });

        Ok(Box::pin(stream))
    }

    fn has_subscribers(&self) -> bool {
        self.topics
            .iter()
            .any(|entry| entry.value().receiver_count() > 0)
    }

    fn provider_name(&self) -> &str {
        "tokio-broadcast"
    }
}
