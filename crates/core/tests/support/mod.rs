//! Shared test helpers for `moodlog-core` integration tests.
//!
//! Lightweight in-memory implementations of the session ports so renewal
//! tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use moodlog_core::{Navigator, SessionStore, SessionUpdate};
use moodlog_domain::{AccessToken, RefreshToken, Result, StoredSession, UserIdentity};
use parking_lot::Mutex;

/// Session store backed by a mutex, counting every update
#[derive(Default)]
pub struct TestStore {
    session: Mutex<StoredSession>,
    updates: AtomicUsize,
}

impl TestStore {
    pub fn with_tokens(access: &str, refresh: Option<&str>) -> Arc<Self> {
        let store = Self::default();
        *store.session.lock() = StoredSession {
            access_token: Some(AccessToken::new(access)),
            refresh_token: refresh.map(RefreshToken::new),
            user: Some(UserIdentity {
                id: "u1".into(),
                email: "ana@example.com".into(),
                name: Some("Ana".into()),
                role: None,
            }),
            role: None,
        };
        Arc::new(store)
    }

    pub fn snapshot(&self) -> StoredSession {
        self.session.lock().clone()
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for TestStore {
    async fn load(&self) -> Result<StoredSession> {
        Ok(self.session.lock().clone())
    }

    async fn apply(&self, update: SessionUpdate) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        update.apply(&mut self.session.lock());
        Ok(())
    }
}

/// Navigator that records every navigation
pub struct TestNavigator {
    location: Mutex<String>,
    history: Mutex<Vec<String>>,
}

impl TestNavigator {
    pub fn at(location: &str) -> Arc<Self> {
        Arc::new(Self { location: Mutex::new(location.to_string()), history: Mutex::new(Vec::new()) })
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl Navigator for TestNavigator {
    fn current_location(&self) -> String {
        self.location.lock().clone()
    }

    fn navigate(&self, location: &str) {
        *self.location.lock() = location.to_string();
        self.history.lock().push(location.to_string());
    }
}
