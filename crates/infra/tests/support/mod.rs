//! Shared helpers for `moodlog-infra` integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use moodlog_domain::{AccessToken, ClientConfig, RefreshToken, StoredSession, UserIdentity};
use moodlog_infra::{ApiClient, MemorySessionStore, WatchNavigator};
use wiremock::MockServer;

pub struct Harness {
    pub client: Arc<ApiClient>,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<WatchNavigator>,
}

pub fn session(access: Option<&str>, refresh: Option<&str>) -> StoredSession {
    StoredSession {
        access_token: access.map(AccessToken::new),
        refresh_token: refresh.map(RefreshToken::new),
        user: Some(UserIdentity {
            id: "u1".into(),
            email: "ana@example.com".into(),
            name: Some("Ana".into()),
            role: None,
        }),
        role: None,
    }
}

/// Client against `server` with a seeded session and the navigator parked at
/// `location`
pub fn harness(server: &MockServer, seeded: StoredSession, location: &str) -> Harness {
    let store = Arc::new(MemorySessionStore::with_session(seeded));
    let navigator = Arc::new(WatchNavigator::new(location));
    let client = ApiClient::builder()
        .config(ClientConfig::new(server.uri()))
        .store(store.clone())
        .navigator(navigator.clone())
        .build()
        .expect("client should build");

    Harness { client: Arc::new(client), store, navigator }
}
