use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::client::ApiClient;
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Pending,
    Resolved,
}

impl LogStatus {
    pub fn toggled(self) -> Self {
        match self {
            LogStatus::Pending => LogStatus::Resolved,
            LogStatus::Resolved => LogStatus::Pending,
        }
    }
}

/// One reflection-log entry kept for clinical review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalLog {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub date: String,
    pub time: String,
    pub text: String,
    pub status: LogStatus,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewClinicalLog {
    pub patient_id: Uuid,
    pub date: String,
    pub time: String,
    pub text: String,
    pub status: LogStatus,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Serialize)]
struct LogStatusPatch {
    status: LogStatus,
}

impl ApiClient {
    pub async fn list_logs(&self, patient_id: Uuid) -> AppResult<Vec<ClinicalLog>> {
        self.get_json(&format!("/api/v1/logs/{patient_id}")).await
    }

    pub async fn create_log(&self, log: &NewClinicalLog) -> AppResult<ClinicalLog> {
        self.post_json("/api/v1/logs", log).await
    }

    pub async fn update_log_status(&self, id: Uuid, status: LogStatus) -> AppResult<ClinicalLog> {
        self.put_json(&format!("/api/v1/logs/{id}"), &LogStatusPatch { status })
            .await
    }
}
