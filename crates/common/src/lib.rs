//! Common types, protocol definitions, and errors shared across `license-responder` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
