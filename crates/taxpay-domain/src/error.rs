//! Error handling types

use crate::value_objects::ServiceName;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tourist-tax services
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Key-value storage error
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error
        message: String,
    },

    /// Payment processing error
    #[error("Payment error: {message}")]
    Payment {
        /// Description of the payment error
        message: String,
    },

    /// A service was called while running on its inert stand-in
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        /// The degraded service
        service: ServiceName,
    },

    /// Registry lookup before `initialize()` completed
    #[error("Service registry not initialized")]
    NotInitialized {
        /// The service that was requested, if the lookup named one
        service: Option<ServiceName>,
    },

    /// Lookup by a name outside the closed service set
    #[error("Unknown service: {name}")]
    UnknownService {
        /// The name that was requested
        name: String,
    },

    /// A factory asked for a service that is built after it
    #[error("Service {requested} is not built yet (required while building {building})")]
    DependencyNotReady {
        /// The service being built
        building: ServiceName,
        /// The dependency it asked for
        requested: ServiceName,
    },

    /// A service factory failed; the whole registry is unusable
    #[error("Failed to construct {service}: {message}")]
    ServiceConstruction {
        /// The service whose construction failed
        service: ServiceName,
        /// Description of the failure
        message: String,
    },

    /// Two descriptors share the same service name
    #[error("Service {service} registered more than once")]
    DuplicateService {
        /// The duplicated service name
        service: ServiceName,
    },

    /// An accessor was called with no provider scope installed
    #[error("No ServiceProvider in scope: accessors must run inside ServiceProvider::scope")]
    OutsideProvider,

    /// The provider is still initializing its registry
    #[error("ServiceProvider is still initializing")]
    NotReady,

    /// The provider was unmounted
    #[error("ServiceProvider has been unmounted")]
    Unmounted,

    /// An operation exceeded its time budget
    #[error("Timed out after {millis}ms: {operation}")]
    Timeout {
        /// What was being waited on
        operation: String,
        /// The budget that was exceeded
        millis: u64,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a payment error
    pub fn payment<S: Into<String>>(message: S) -> Self {
        Self::Payment {
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

// Network error creation methods
impl Error {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Service lifecycle error creation methods
impl Error {
    /// Create a construction failure for a service
    pub fn construction<S: Into<String>>(service: ServiceName, message: S) -> Self {
        Self::ServiceConstruction {
            service,
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(operation: S, millis: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            millis,
        }
    }

    /// Whether this error is a violation of the accessor contract
    /// (usage before ready or outside a provider) rather than a runtime failure
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized { .. }
                | Self::NotReady
                | Self::Unmounted
                | Self::OutsideProvider
                | Self::UnknownService { .. }
        )
    }
}
