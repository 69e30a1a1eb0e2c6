//! Language providers

pub mod null;
pub mod stored;

pub use null::NullLanguageProvider;
pub use stored::StoredLanguageProvider;
