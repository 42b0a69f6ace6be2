//! Typed endpoint services
//!
//! Thin wrappers over [`ApiClient`](crate::api::ApiClient), one method per
//! backend call. They share the client, so they share its renewal.

pub mod auth;
pub mod journals;
pub mod users;

pub use auth::AuthService;
pub use journals::JournalService;
pub use users::UserService;
