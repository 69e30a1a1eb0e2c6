//! Provider defaults

/// Default broadcast buffer per event topic
pub const EVENT_BUS_DEFAULT_CAPACITY: usize = 1024;

/// Default HTTP request timeout in seconds
pub const HTTP_DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default API base URL
pub const HTTP_DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default payment endpoint, relative to the API base URL
pub const PAYMENT_DEFAULT_ENDPOINT: &str = "payments";

/// Suffix of the temporary file used for atomic storage writes
pub const STORAGE_TEMP_SUFFIX: &str = ".tmp";
