use std::sync::Arc;

use moodlog_domain::constants::{USER_PROFILE_PATH, USER_STATS_PATH};
use moodlog_domain::{Result, UserProfile, UserStats};
use tracing::instrument;

use crate::api::ApiClient;

#[derive(Clone)]
pub struct UserService {
    client: Arc<ApiClient>,
}

impl UserService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Streaks, entry count and mood distribution
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<UserStats> {
        self.client.get(USER_STATS_PATH).await
    }

    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserProfile> {
        self.client.get(USER_PROFILE_PATH).await
    }
}
