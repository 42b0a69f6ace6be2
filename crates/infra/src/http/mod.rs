//! Raw HTTP transport.
//!
//! No interception happens at this layer; the renewal endpoint is called
//! through it directly so a failing refresh can never recurse into renewal.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
