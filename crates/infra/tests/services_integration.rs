//! Integration tests for the typed endpoint services

mod support;

use moodlog_core::Navigator;
use moodlog_domain::{
    AccessToken, JournalUpdate, NewAccount, NewJournalEntry, RefreshToken, Role, StoredSession,
};
use moodlog_infra::{AuthService, JournalService, UserService};
use serde_json::json;
use support::{harness, session};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": "Walked by the river",
        "mood": "calm",
        "tags": ["outdoors"],
        "createdAt": "2026-10-01T08:00:00Z",
        "updatedAt": "2026-10-01T08:00:00Z"
    })
}

#[tokio::test]
async fn test_login_persists_tokens_identity_and_role() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "ana@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "a1",
            "refreshToken": "r1",
            "user": { "id": "u1", "email": "ana@example.com", "role": "premium" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, StoredSession::default(), "/login");
    let auth = AuthService::new(h.client.clone());

    auth.login("ana@example.com", "hunter2").await.unwrap();

    let stored = h.store.snapshot();
    assert_eq!(stored.access_token, Some(AccessToken::new("a1")));
    assert_eq!(stored.refresh_token, Some(RefreshToken::new("r1")));
    assert_eq!(stored.role, Some(Role::Premium));
    assert!(auth.is_authenticated().await.unwrap());
    assert_eq!(auth.role().await.unwrap(), Some(Role::Premium));
}

#[tokio::test]
async fn test_verify_otp_persists_like_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/verify-otp"))
        .and(body_json(json!({ "email": "ana@example.com", "otp": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "a2" })))
        .mount(&server)
        .await;

    let h = harness(&server, StoredSession::default(), "/otp");
    let auth = AuthService::new(h.client.clone());

    auth.verify_otp("ana@example.com", "123456").await.unwrap();

    assert_eq!(h.store.snapshot().access_token, Some(AccessToken::new("a2")));
    assert_eq!(h.store.snapshot().role, None);
}

#[tokio::test]
async fn test_account_recovery_calls() {
    let server = MockServer::start().await;
    for (route, body) in [
        ("/auth/register", json!({ "name": "Ana", "email": "ana@example.com", "password": "pw" })),
        ("/auth/verify-email", json!({ "token": "t1" })),
        ("/auth/forgot-password", json!({ "email": "ana@example.com" })),
        ("/auth/reset-password", json!({ "token": "t2", "password": "new-pw" })),
    ] {
        Mock::given(method("POST"))
            .and(path(route))
            .and(body_json(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let h = harness(&server, StoredSession::default(), "/register");
    let auth = AuthService::new(h.client.clone());

    let account =
        NewAccount { name: "Ana".into(), email: "ana@example.com".into(), password: "pw".into() };
    assert_eq!(auth.register(&account).await.unwrap().message.as_deref(), Some("ok"));
    auth.verify_email("t1").await.unwrap();
    auth.forgot_password("ana@example.com").await.unwrap();
    auth.reset_password("t2", "new-pw").await.unwrap();
}

#[tokio::test]
async fn test_logout_ends_session_even_when_backend_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(body_json(json!({ "refreshToken": "r1" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, session(Some("a1"), Some("r1")), "/journals");
    let auth = AuthService::new(h.client.clone());

    auth.logout().await.unwrap();

    assert!(h.store.snapshot().is_empty());
    assert_eq!(h.navigator.current_location(), "/login");
    assert!(!auth.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_current_user_refreshes_cached_role() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1", "email": "ana@example.com", "role": "admin"
        })))
        .mount(&server)
        .await;

    let h = harness(&server, session(Some("a1"), Some("r1")), "/");
    let auth = AuthService::new(h.client.clone());

    let user = auth.current_user().await.unwrap();

    assert_eq!(user.role, Some(Role::Admin));
    assert_eq!(h.store.snapshot().role, Some(Role::Admin));
}

#[tokio::test]
async fn test_google_login_url_is_absolute() {
    let server = MockServer::start().await;
    let h = harness(&server, StoredSession::default(), "/login");
    let auth = AuthService::new(h.client.clone());

    assert_eq!(auth.google_login_url(), format!("{}/auth/google", server.uri()));
}

#[tokio::test]
async fn test_journal_crud_and_analysis() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/journals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([entry("j1", "Monday")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/journals/j1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry("j1", "Monday")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/journals"))
        .and(body_json(json!({ "title": "Tuesday", "content": "Rain", "mood": "calm" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(entry("j2", "Tuesday")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/journals/j2"))
        .and(body_json(json!({ "title": "Tuesday evening" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry("j2", "Tuesday evening")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/journals/j2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/journals/j1/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "A calm day",
            "suggestions": ["Keep walking"],
            "sentiment": 0.6
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, session(Some("a1"), Some("r1")), "/journals");
    let journals = JournalService::new(h.client.clone());

    let list = journals.list().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].tags, vec!["outdoors"]);
    assert_eq!(journals.get("j1").await.unwrap().title, "Monday");

    let created = journals
        .create(&NewJournalEntry {
            title: "Tuesday".into(),
            content: "Rain".into(),
            mood: Some("calm".into()),
            tags: Vec::new(),
            template_id: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, "j2");

    let update = JournalUpdate { title: Some("Tuesday evening".into()), ..Default::default() };
    assert_eq!(journals.update("j2", &update).await.unwrap().title, "Tuesday evening");

    journals.delete("j2").await.unwrap();

    let analysis = journals.analyze("j1").await.unwrap();
    assert_eq!(analysis.summary.as_deref(), Some("A calm day"));
    assert_eq!(analysis.suggestions, vec!["Keep walking"]);
}

#[tokio::test]
async fn test_user_stats_and_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalEntries": 12,
            "currentStreak": 3,
            "longestStreak": 7,
            "moodCounts": { "calm": 5, "happy": 7 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1", "email": "ana@example.com", "isPremium": true
        })))
        .mount(&server)
        .await;

    let h = harness(&server, session(Some("a1"), Some("r1")), "/dashboard");
    let users = UserService::new(h.client.clone());

    let stats = users.stats().await.unwrap();
    assert_eq!(stats.longest_streak, 7);
    assert_eq!(stats.mood_counts.get("happy"), Some(&7));

    let profile = users.profile().await.unwrap();
    assert!(profile.is_premium);
    assert_eq!(profile.role, None);
}
