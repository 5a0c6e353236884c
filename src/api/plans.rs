use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::client::ApiClient;
use crate::error::AppResult;
use crate::plan::WeekPlan;

/// Wire envelope for a stored plan: `{"days": {...}}`. A patient without a
/// saved plan deserializes to a fresh, fully populated week.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub days: WeekPlan,
}

impl ApiClient {
    pub async fn fetch_plan(&self, patient_id: Uuid) -> AppResult<WeekPlan> {
        let doc: PlanDocument = self.get_json(&format!("/api/v1/plans/{patient_id}")).await?;
        Ok(doc.days)
    }

    pub async fn save_plan(&self, patient_id: Uuid, plan: &WeekPlan) -> AppResult<()> {
        let body = serde_json::json!({ "days": plan });
        let _: serde_json::Value = self
            .post_json(&format!("/api/v1/plans/{patient_id}"), &body)
            .await?;
        Ok(())
    }
}
