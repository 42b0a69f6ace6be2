//! Configuration loader
//!
//! Loads the client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment if one exists
//! 2. Attempts to build the configuration from environment variables
//! 3. If `MOODLOG_API_BASE_URL` is missing, falls back to a config file;
//!    any other invalid value is an error
//! 4. Probes multiple paths for config files (JSON or TOML)
//!
//! ## Environment Variables
//! - `MOODLOG_API_BASE_URL`: Backend base URL (required)
//! - `MOODLOG_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `MOODLOG_REFRESH_PATH`: Session renewal endpoint path
//! - `MOODLOG_USER_AGENT`: User agent override
//! - `MOODLOG_LOGIN_ROUTE`: Route to send the user to when the session ends
//! - `MOODLOG_SESSION_FILE`: Persist the session to this JSON file
//! - `MOODLOG_LOG_FILTER`: Tracing filter directives
//! - `MOODLOG_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! `moodlog.{json,toml}` then `config.{json,toml}`, looked up in the current
//! directory, its two parents, and the same three levels around the
//! executable.

use std::path::{Path, PathBuf};

use moodlog_domain::{ApiError, ClientConfig, Result};

const ENV_BASE_URL: &str = "MOODLOG_API_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "MOODLOG_API_TIMEOUT_SECS";
const ENV_REFRESH_PATH: &str = "MOODLOG_REFRESH_PATH";
const ENV_USER_AGENT: &str = "MOODLOG_USER_AGENT";
const ENV_LOGIN_ROUTE: &str = "MOODLOG_LOGIN_ROUTE";
const ENV_SESSION_FILE: &str = "MOODLOG_SESSION_FILE";
const ENV_LOG_FILTER: &str = "MOODLOG_LOG_FILTER";
const ENV_LOG_JSON: &str = "MOODLOG_LOG_JSON";

const CONFIG_FILE_NAMES: [&str; 4] = ["moodlog.json", "moodlog.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ApiError::Config` if the environment holds an invalid value, or
/// if `MOODLOG_API_BASE_URL` is unset and no valid config file is found.
pub fn load() -> Result<ClientConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    if env_opt(ENV_BASE_URL).is_none() {
        tracing::debug!("{ENV_BASE_URL} not set, trying config file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `MOODLOG_API_BASE_URL` is required; every other variable falls back
/// to the default.
///
/// # Errors
/// Returns `ApiError::Config` if the base URL is missing or any value is
/// invalid.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var(ENV_BASE_URL)?);

    if let Some(timeout) = env_opt(ENV_TIMEOUT_SECS) {
        config.api.timeout_secs = timeout
            .parse()
            .map_err(|e| ApiError::Config(format!("Invalid {ENV_TIMEOUT_SECS}: {e}")))?;
    }
    if let Some(path) = env_opt(ENV_REFRESH_PATH) {
        config.api.refresh_path = path;
    }
    config.api.user_agent = env_opt(ENV_USER_AGENT);

    if let Some(route) = env_opt(ENV_LOGIN_ROUTE) {
        config.session.login_route = route;
    }
    config.session.store_path = env_opt(ENV_SESSION_FILE).map(PathBuf::from);

    if let Some(filter) = env_opt(ENV_LOG_FILTER) {
        config.logging.filter = filter;
    }
    config.logging.json = env_bool(ENV_LOG_JSON, false);

    validate(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. JSON and TOML are
/// told apart by extension.
///
/// # Errors
/// Returns `ApiError::Config` if the file is missing, unreadable, malformed
/// or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) if p.exists() => p,
        Some(p) => {
            return Err(ApiError::Config(format!("Config file not found: {}", p.display())));
        }
        None => probe_config_paths().ok_or_else(|| {
            ApiError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ApiError::Config(format!("Failed to read config file: {e}")))?;

    validate(parse_config(&contents, &config_path)?)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ApiError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ApiError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ApiError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn validate(config: ClientConfig) -> Result<ClientConfig> {
    let base = url::Url::parse(&config.api.base_url)
        .map_err(|e| ApiError::Config(format!("Invalid base URL {:?}: {e}", config.api.base_url)))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!("Unsupported base URL scheme: {}", base.scheme())));
    }
    if config.api.timeout_secs == 0 {
        return Err(ApiError::Config("Timeout must be at least one second".to_string()));
    }
    if !config.api.refresh_path.starts_with('/') {
        return Err(ApiError::Config(format!(
            "Refresh path must start with '/': {}",
            config.api.refresh_path
        )));
    }
    if config.session.login_route.trim().is_empty() {
        return Err(ApiError::Config("Login route must not be empty".to_string()));
    }
    Ok(config)
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| ApiError::Config(format!("Missing required environment variable: {key}")))
}

/// Set and non-blank
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
