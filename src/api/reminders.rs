use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::client::ApiClient;
use crate::error::AppResult;

/// Declaration order doubles as display order: high first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub message: String,
    pub priority: ReminderPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ApiClient {
    pub async fn list_reminders(&self) -> AppResult<Vec<Reminder>> {
        self.get_json("/api/v1/reminders").await
    }

    pub async fn dismiss_reminder(&self, id: Uuid) -> AppResult<()> {
        self.delete(&format!("/api/v1/reminders/{id}")).await
    }
}
