//! Domain constants

/// Storage key holding the selected language
pub const LANGUAGE_STORAGE_KEY: &str = "language";

/// Locale used when nothing else is configured
pub const DEFAULT_LOCALE: &str = "pl";
