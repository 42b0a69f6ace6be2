//! # Moodlog Domain
//!
//! Domain types and models for the Moodlog client.
//!
//! This crate contains:
//! - Session credential types (access/refresh tokens, cached identity)
//! - Wire schemas for the backend's auth, journal and user endpoints
//! - The client error taxonomy and Result definition
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other Moodlog crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
