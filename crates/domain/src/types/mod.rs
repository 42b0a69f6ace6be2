//! Domain types and models

pub mod auth;
pub mod journal;
pub mod session;
pub mod user;

pub use auth::{
    AuthResponse, ErrorBody, ForgotPasswordRequest, LoginRequest, MessageResponse, NewAccount,
    OtpRequest, RefreshRequest, RefreshResponse, ResetPasswordRequest, VerifyEmailRequest,
};
pub use journal::{AnalysisResult, JournalEntry, JournalUpdate, NewJournalEntry};
pub use session::{AccessToken, RefreshToken, Role, StoredSession, UserIdentity};
pub use user::{UserProfile, UserStats};
