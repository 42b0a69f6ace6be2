//! # Moodlog Infrastructure
//!
//! Infrastructure implementations of the core session ports and the HTTP
//! side of the client.
//!
//! This crate contains:
//! - The raw HTTP transport and the intercepting API client
//! - Session store and navigator implementations
//! - Typed endpoint services (auth, journals, users)
//! - Configuration loading and tracing initialisation
//!
//! ## Architecture
//! - Implements traits defined in `moodlog-core`
//! - Depends on `moodlog-domain` and `moodlog-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod context;
pub mod errors;
pub mod http;
pub mod observability;
pub mod services;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder, ApiRequest, MultipartBody, MultipartPart, RequestBody};
pub use context::ClientContext;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use services::{AuthService, JournalService, UserService};
pub use session::{FileSessionStore, MemorySessionStore, WatchNavigator};
