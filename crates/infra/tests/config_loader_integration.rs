//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::path::PathBuf;

use moodlog_domain::ApiError;
use moodlog_infra::config;
use tempfile::TempDir;

#[test]
fn test_load_config_from_json_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("moodlog.json");
    std::fs::write(
        &path,
        r#"{
            "api": {
                "base_url": "https://api.moodlog.test/api",
                "timeout_secs": 15,
                "user_agent": "moodlog-desktop/2.0"
            },
            "session": {
                "login_route": "/signin",
                "store_path": "/tmp/moodlog-integration/session.json",
                "public_path_fragments": ["login", "otp"]
            },
            "logging": { "filter": "moodlog_infra=trace", "json": true }
        }"#,
    )
    .expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("Failed to load config from JSON file");

    assert_eq!(config.api.base_url, "https://api.moodlog.test/api");
    assert_eq!(config.api.timeout_secs, 15);
    assert_eq!(config.api.refresh_path, "/auth/refresh");
    assert_eq!(config.api.user_agent.as_deref(), Some("moodlog-desktop/2.0"));

    assert_eq!(config.session.login_route, "/signin");
    assert_eq!(
        config.session.store_path,
        Some(PathBuf::from("/tmp/moodlog-integration/session.json"))
    );
    assert_eq!(config.session.public_path_fragments, vec!["login", "otp"]);

    assert_eq!(config.logging.filter, "moodlog_infra=trace");
    assert!(config.logging.json);
}

#[test]
fn test_load_config_from_toml_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        [api]
        base_url = "http://localhost:5000/api"

        [session]
        login_route = "/login"
        "#,
    )
    .expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("Failed to load config from TOML file");

    assert_eq!(config.api.base_url, "http://localhost:5000/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert!(config.session.store_path.is_none());
    assert!(!config.logging.json);
}

#[test]
fn test_load_config_missing_api_section() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("moodlog.json");
    std::fs::write(&path, r#"{ "logging": { "json": true } }"#).expect("Failed to write config");

    let result = config::load_from_file(Some(path));
    assert!(matches!(result, Err(ApiError::Config(msg)) if msg.contains("Invalid JSON")));
}

#[test]
fn test_load_config_malformed_toml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("moodlog.toml");
    std::fs::write(&path, "[api\nbase_url = ").expect("Failed to write config");

    let result = config::load_from_file(Some(path));
    assert!(matches!(result, Err(ApiError::Config(msg)) if msg.contains("Invalid TOML")));
}
