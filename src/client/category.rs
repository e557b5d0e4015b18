use super::{ApiClient, ClientResult};
use crate::models::CategoryData;
use reqwest::{Method, StatusCode};
use serde_json::json;

impl ApiClient {
    pub async fn get_categories_with_tasks(&self, session: &str) -> ClientResult<Vec<CategoryData>> {
        self.json_of(self.request(Method::GET, "/categories/dashboard", Some(session)))
            .await
    }

    pub async fn add_category(&self, session: &str, kind: &str) -> ClientResult<StatusCode> {
        let builder = self
            .request(Method::POST, "/categories/create", Some(session))
            .json(&json!({ "type": kind }));

        self.status_of(builder).await
    }

    pub async fn delete_category(&self, session: &str, category_id: i64) -> ClientResult<StatusCode> {
        let builder = self
            .request(Method::DELETE, "/categories/delete", Some(session))
            .query(&[("category_id", category_id)]);

        self.status_of(builder).await
    }
}
