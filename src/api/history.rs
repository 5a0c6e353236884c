use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::client::ApiClient;
use crate::error::AppResult;

/// Audit-trail entry for calculations and plan saves, keyed by a free-form
/// activity label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub activity_type: String,
    pub input_data: serde_json::Value,
    pub output_result: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewHistoryEntry {
    pub activity_type: String,
    pub input_data: serde_json::Value,
    pub output_result: serde_json::Value,
}

impl ApiClient {
    pub async fn record_history(&self, entry: &NewHistoryEntry) -> AppResult<()> {
        let _: serde_json::Value = self.post_json("/history/add", entry).await?;
        Ok(())
    }

    pub async fn list_history(&self) -> AppResult<Vec<HistoryEntry>> {
        self.get_json("/history/list").await
    }
}
