//! Error types used throughout the client
//!
//! `ApiError` is `Clone` so that a single renewal outcome can be handed to
//! every request that queued behind it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorCategory {
    /// Authentication errors (401) and expired sessions
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except 401/429)
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Local failures: configuration, storage, decoding, cancellation
    Local,
}

/// Main error type for the Moodlog client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ApiError {
    /// 401 from the backend. The message is the server-provided text when
    /// the body follows the error schema.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// 403 from the backend
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Response body did not match the expected schema
    #[error("Decode error: {0}")]
    Decode(String),

    /// Session store read/write failure
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The task leading a token renewal was dropped before it settled
    #[error("Operation cancelled")]
    Cancelled,
}

impl ApiError {
    /// Get the error category for this error
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Forbidden(_) | Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) | Self::Storage(_) | Self::Config(_) | Self::Cancelled => {
                ApiErrorCategory::Local
            }
        }
    }

    /// Whether this error came from a 401 response
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Classify a non-success HTTP status into an error.
    ///
    /// `message` is the human-readable text already extracted from the
    /// response body (or the status text when the body had none).
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Auth(message),
            403 => Self::Forbidden(message),
            429 => Self::RateLimit(message),
            500..=599 => Self::Server(message),
            400..=499 => Self::Client(message),
            _ => Self::Network(message),
        }
    }
}

/// Result type alias for Moodlog operations
pub type Result<T> = std::result::Result<T, ApiError>;
