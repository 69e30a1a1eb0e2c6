//! Service names
//!
//! The closed set of capabilities a registry can hold. Lookups by string
//! go through [`ServiceName::from_str`], so an unknown name is rejected at
//! the boundary instead of surfacing as a missing entry later.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a platform service
///
/// Serializes as its canonical string, the same form [`ServiceName::as_str`]
/// returns and lookups accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceName {
    /// Key-value storage
    #[serde(rename = "StorageService")]
    Storage,
    /// HTTP API client
    #[serde(rename = "ApiService")]
    Api,
    /// Topic-based event bus
    #[serde(rename = "EventBus")]
    EventBus,
    /// Payment processing
    #[serde(rename = "PaymentService")]
    Payment,
    /// Language selection
    #[serde(rename = "LanguageService")]
    Language,
}

impl ServiceName {
    /// Every service, in default construction order
    pub const ALL: [ServiceName; 5] = [
        ServiceName::Storage,
        ServiceName::Api,
        ServiceName::EventBus,
        ServiceName::Payment,
        ServiceName::Language,
    ];

    /// Canonical string name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storage => "StorageService",
            Self::Api => "ApiService",
            Self::EventBus => "EventBus",
            Self::Payment => "PaymentService",
            Self::Language => "LanguageService",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::UnknownService {
                name: s.to_string(),
            })
    }
}
