//! # Moodlog Core
//!
//! Transport-free session logic for the Moodlog client.
//!
//! This crate contains:
//! - Port interfaces (traits) for credential storage and navigation
//! - The public authentication endpoint policy
//! - The single-flight renewal gate and the renewal/teardown orchestration
//!
//! ## Architecture Principles
//! - Only depends on `moodlog-domain`
//! - No HTTP or filesystem code; the refresh call is injected
//! - Pure, testable business logic

pub mod session;

pub use session::gate::RenewalGate;
pub use session::policy::PublicEndpointPolicy;
pub use session::ports::{Navigator, SessionStore, SessionUpdate};
pub use session::renewal::SessionRenewal;
