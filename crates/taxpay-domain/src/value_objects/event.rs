//! Event bus message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message published on a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    /// Topic the message was published to
    pub topic: String,
    /// Message payload
    pub payload: serde_json::Value,
    /// Publication time
    pub published_at: DateTime<Utc>,
}

impl EventMessage {
    /// Create a message stamped with the current time
    pub fn new(topic: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
            published_at: Utc::now(),
        }
    }
}
