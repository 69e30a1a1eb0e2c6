//! # Providers
//!
//! Implementations of the service ports defined in `taxpay-domain`.
//! Every port has at least one live provider and one null provider; the
//! null providers make up the fallback registry.
//!
//! | Module | Live | Null |
//! |--------|------|------|
//! | [`storage`] | `MemoryStorageProvider`, `FileStorageProvider` | `NullStorageProvider` |
//! | [`http`] | `ReqwestApiClient` | `NullApiClient` |
//! | [`events`] | `TokioEventBusProvider` | `NullEventBus` |
//! | [`payment`] | `ApiPaymentProvider` | `NullPaymentProvider` |
//! | [`language`] | `StoredLanguageProvider` | `NullLanguageProvider` |

pub mod constants;
pub mod events;
pub mod http;
pub mod language;
pub mod payment;
pub mod storage;
