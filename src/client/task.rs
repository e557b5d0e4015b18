use super::{ApiClient, ClientResult};
use crate::models::Task;
use reqwest::{Method, StatusCode};
use serde_json::json;

impl ApiClient {
    pub async fn create_task(
        &self,
        session: &str,
        title: &str,
        description: &str,
        category_id: i64,
    ) -> ClientResult<StatusCode> {
        let builder = self
            .request(Method::POST, "/tasks/create", Some(session))
            .json(&json!({
                "title": title,
                "description": description,
                "category_id": category_id,
            }));

        self.status_of(builder).await
    }

    pub async fn get_task(&self, session: &str, task_id: i64) -> ClientResult<Task> {
        let builder = self
            .request(Method::GET, "/tasks/get", Some(session))
            .query(&[("task_id", task_id)]);

        self.json_of(builder).await
    }

    pub async fn update_task(
        &self,
        session: &str,
        task_id: i64,
        title: &str,
        description: &str,
    ) -> ClientResult<StatusCode> {
        let builder = self
            .request(Method::PUT, "/tasks/update", Some(session))
            .query(&[("task_id", task_id)])
            .json(&json!({
                "title": title,
                "description": description,
            }));

        self.status_of(builder).await
    }

    pub async fn update_task_category(
        &self,
        session: &str,
        task_id: i64,
        category_id: i64,
    ) -> ClientResult<StatusCode> {
        let builder = self
            .request(Method::PUT, "/tasks/update/category", Some(session))
            .query(&[("task_id", task_id)])
            .json(&json!({ "category_id": category_id }));

        self.status_of(builder).await
    }

    pub async fn delete_task(&self, session: &str, task_id: i64) -> ClientResult<StatusCode> {
        let builder = self
            .request(Method::DELETE, "/tasks/delete", Some(session))
            .query(&[("task_id", task_id)]);

        self.status_of(builder).await
    }
}
