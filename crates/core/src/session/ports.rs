//! Port interfaces for session persistence and navigation
//!
//! These traits define the boundaries between the renewal logic and the
//! infrastructure that stores credentials and owns the current location.

use async_trait::async_trait;
use moodlog_domain::{AccessToken, RefreshToken, Result, StoredSession, UserIdentity};

/// A single mutation of the persisted session.
///
/// Stores apply an update atomically (read, modify, write under one lock) so
/// concurrent updates never lose each other's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Credentials and identity from a successful login
    SignIn {
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        user: Option<UserIdentity>,
    },
    SetAccessToken(AccessToken),
    SetRefreshToken(RefreshToken),
    /// Refresh the cached identity (and its role) without touching tokens
    SetUser(UserIdentity),
    ClearAccessToken,
    /// Remove tokens, cached identity and role
    Clear,
}

impl SessionUpdate {
    /// Apply this update to an in-memory session
    pub fn apply(self, session: &mut StoredSession) {
        match self {
            Self::SignIn { access_token, refresh_token, user } => {
                session.access_token = Some(access_token);
                if refresh_token.is_some() {
                    session.refresh_token = refresh_token;
                }
                // Role comes from exactly one claim: the user's `role` field.
                session.role = user.as_ref().and_then(|u| u.role);
                session.user = user;
            }
            Self::SetAccessToken(token) => session.access_token = Some(token),
            Self::SetRefreshToken(token) => session.refresh_token = Some(token),
            Self::SetUser(user) => {
                session.role = user.role;
                session.user = Some(user);
            }
            Self::ClearAccessToken => session.access_token = None,
            Self::Clear => *session = StoredSession::default(),
        }
    }
}

/// Durable storage for session credentials
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the whole persisted session. An absent session is empty, not an
    /// error.
    async fn load(&self) -> Result<StoredSession>;

    /// Atomically apply one update
    async fn apply(&self, update: SessionUpdate) -> Result<()>;

    /// Stored access token, if any
    async fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.load().await?.access_token)
    }

    /// Stored refresh token, if any
    async fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.load().await?.refresh_token)
    }
}

/// Owner of the current view location (the browser location in a web UI)
pub trait Navigator: Send + Sync {
    /// Current location path, e.g. `/journals?page=2`
    fn current_location(&self) -> String;

    /// Move to `location`
    fn navigate(&self, location: &str);
}
