use serde::Deserialize;

use super::client::ApiClient;
use crate::error::AppResult;
use crate::exchange::FoodItem;

#[derive(Debug, Deserialize)]
pub struct ExchangeListResponse {
    pub items: Vec<FoodItem>,
}

impl ApiClient {
    /// Fetches the exchange list, optionally narrowed to one category.
    pub async fn fetch_exchange_list(&self, category: Option<&str>) -> AppResult<Vec<FoodItem>> {
        let path = match category {
            Some(c) => format!("/api/v1/exchange-list/category/{c}"),
            None => "/api/v1/exchange-list".to_string(),
        };
        let resp: ExchangeListResponse = self.get_json(&path).await?;
        Ok(resp.items)
    }
}
