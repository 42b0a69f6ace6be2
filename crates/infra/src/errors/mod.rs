//! Infrastructure error handling
//!
//! External error types (reqwest, serde_json, io, url) are converted into
//! the domain `ApiError` here so nothing above this crate sees them.

pub mod conversions;

pub use conversions::InfraError;
