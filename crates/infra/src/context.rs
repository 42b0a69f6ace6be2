//! Client context - dependency injection container

use std::sync::Arc;

use moodlog_core::SessionStore;
use moodlog_domain::{ClientConfig, Result};
use tokio::sync::watch;
use tracing::info;

use crate::api::ApiClient;
use crate::config;
use crate::services::{AuthService, JournalService, UserService};
use crate::session::{FileSessionStore, MemorySessionStore, WatchNavigator};

/// Client context - holds the shared API client and the services built on it
pub struct ClientContext {
    pub config: ClientConfig,
    pub client: Arc<ApiClient>,
    pub store: Arc<dyn SessionStore>,
    pub navigator: Arc<WatchNavigator>,
    pub auth: AuthService,
    pub journals: JournalService,
    pub users: UserService,
}

impl ClientContext {
    /// Load configuration from the environment or a config file and wire
    /// everything up
    ///
    /// # Errors
    /// Returns `ApiError::Config` if configuration is missing or invalid.
    pub fn load() -> Result<Self> {
        Self::from_config(config::load()?)
    }

    /// Wire up the client from an explicit configuration.
    ///
    /// The session is persisted to `session.store_path` when set, otherwise
    /// kept in memory. The navigator starts at `/`.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let store: Arc<dyn SessionStore> = match &config.session.store_path {
            Some(path) => {
                info!(path = %path.display(), "using file session store");
                Arc::new(FileSessionStore::new(path))
            }
            None => Arc::new(MemorySessionStore::new()),
        };

        Self::with_ports(config, store, Arc::new(WatchNavigator::default()))
    }

    /// Wire up the client around caller-provided ports
    pub fn with_ports(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<WatchNavigator>,
    ) -> Result<Self> {
        let client = Arc::new(ApiClient::new(&config, store.clone(), navigator.clone())?);

        Ok(Self {
            auth: AuthService::new(client.clone()),
            journals: JournalService::new(client.clone()),
            users: UserService::new(client.clone()),
            config,
            client,
            store,
            navigator,
        })
    }

    /// Follow forced navigations, e.g. the redirect to login when the
    /// session ends
    pub fn navigation(&self) -> watch::Receiver<String> {
        self.navigator.subscribe()
    }
}
