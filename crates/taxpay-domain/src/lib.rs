//! # Domain Layer
//!
//! Types shared by every layer of the tourist-tax services: the error
//! type, value objects and the service ports the registry wires together.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::ServiceName;
