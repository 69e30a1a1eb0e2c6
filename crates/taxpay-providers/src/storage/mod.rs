//! Storage providers
//!
//! | Provider | Backing |
//! |----------|---------|
//! | [`MemoryStorageProvider`] | `DashMap`, process lifetime |
//! | [`FileStorageProvider`] | JSON file, persistent |
//! | [`NullStorageProvider`] | nothing (fallback) |

pub mod file;
pub mod memory;
pub mod null;

pub use file::FileStorageProvider;
pub use memory::MemoryStorageProvider;
pub use null::NullStorageProvider;
