//! Backend API access
//!
//! [`ApiClient`] wraps the raw [`HttpClient`](crate::http::HttpClient) with
//! bearer-token attachment and single-flight token renewal. Requests are
//! described by [`ApiRequest`] so they can be replayed after a renewal.

pub mod client;
pub mod request;

pub use client::{ApiClient, ApiClientBuilder};
pub use request::{ApiRequest, MultipartBody, MultipartPart, RequestBody};
