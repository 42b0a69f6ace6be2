//! Application constants
//!
//! Centralized location for domain-level constants used by the client.

/// Path fragments that identify public authentication endpoints.
///
/// A 401 from any path containing one of these (case-insensitive) means the
/// user supplied bad credentials, not that the session expired.
pub const PUBLIC_AUTH_PATH_FRAGMENTS: [&str; 7] =
    ["login", "register", "verify", "forgot", "reset", "google", "otp"];

// Routing
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";

// Transport
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("moodlog-client/", env!("CARGO_PKG_VERSION"));

// Logging
pub const DEFAULT_LOG_FILTER: &str = "info";

// Backend endpoints
pub const AUTH_LOGIN_PATH: &str = "/auth/login";
pub const AUTH_REGISTER_PATH: &str = "/auth/register";
pub const AUTH_VERIFY_EMAIL_PATH: &str = "/auth/verify-email";
pub const AUTH_FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const AUTH_RESET_PASSWORD_PATH: &str = "/auth/reset-password";
pub const AUTH_VERIFY_OTP_PATH: &str = "/auth/verify-otp";
pub const AUTH_GOOGLE_PATH: &str = "/auth/google";
pub const AUTH_LOGOUT_PATH: &str = "/auth/logout";
pub const AUTH_ME_PATH: &str = "/auth/me";
pub const JOURNALS_PATH: &str = "/journals";
pub const USER_STATS_PATH: &str = "/users/stats";
pub const USER_PROFILE_PATH: &str = "/users/profile";
