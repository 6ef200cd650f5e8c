use serde_json::json;

use super::{
    client::ApiClient,
    types::{ApiError, MessageResponse, Penalty},
};

impl ApiClient {
    pub async fn all_penalties(&self) -> Result<Vec<Penalty>, ApiError> {
        self.get_json("/admin/penalties").await
    }

    pub async fn remove_penalty(&self, penalty_id: i64) -> Result<MessageResponse, ApiError> {
        self.post_json(&format!("/admin/penalties/{}/remove", penalty_id), &json!({}))
            .await
    }
}
