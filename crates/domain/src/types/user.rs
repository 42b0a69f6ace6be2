//! User profile and statistics types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::Role;

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Journaling statistics for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total_entries: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Entry count per mood label
    pub mood_counts: BTreeMap<String, u32>,
}
