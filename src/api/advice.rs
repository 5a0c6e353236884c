use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceItem {
    pub category: String,
    pub tip: String,
}

impl ApiClient {
    pub async fn fetch_advice(&self, category: Option<&str>) -> AppResult<Vec<AdviceItem>> {
        let path = match category {
            Some(c) => format!("/advice?category={c}"),
            None => "/advice".to_string(),
        };
        self.get_json(&path).await
    }
}
