use std::sync::Arc;

use moodlog_domain::constants::JOURNALS_PATH;
use moodlog_domain::{AnalysisResult, JournalEntry, JournalUpdate, NewJournalEntry, Result};
use tracing::instrument;

use crate::api::ApiClient;

/// Journal entry CRUD plus the backend's AI analysis
#[derive(Clone)]
pub struct JournalService {
    client: Arc<ApiClient>,
}

impl JournalService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<JournalEntry>> {
        self.client.get(JOURNALS_PATH).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<JournalEntry> {
        self.client.get(&entry_path(id)).await
    }

    #[instrument(skip_all)]
    pub async fn create(&self, entry: &NewJournalEntry) -> Result<JournalEntry> {
        self.client.post(JOURNALS_PATH, entry).await
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: &str, update: &JournalUpdate) -> Result<JournalEntry> {
        self.client.put(&entry_path(id), update).await
    }

    /// Accepts both `204 No Content` and a JSON acknowledgement
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _: serde_json::Value = self.client.delete(&entry_path(id)).await?;
        Ok(())
    }

    /// Ask the backend to analyse one entry
    #[instrument(skip(self))]
    pub async fn analyze(&self, id: &str) -> Result<AnalysisResult> {
        self.client.post(&format!("{}/analyze", entry_path(id)), &serde_json::json!({})).await
    }
}

fn entry_path(id: &str) -> String {
    format!("{JOURNALS_PATH}/{id}")
}
