use super::{ApiClient, ClientResult};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Status of a login or register call plus the user id when one came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthOutcome {
    pub status: StatusCode,
    pub user_id: Option<i64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct UserIdBody {
    user_id: Option<i64>,
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthOutcome> {
        let builder = self
            .request(Method::POST, "/users/login", None)
            .json(&json!({ "email": email, "password": password }));

        self.auth_outcome(builder).await
    }

    pub async fn register(
        &self,
        fullname: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthOutcome> {
        let builder = self
            .request(Method::POST, "/users/register", None)
            .json(&json!({ "fullname": fullname, "email": email, "password": password }));

        self.auth_outcome(builder).await
    }

    async fn auth_outcome(&self, builder: reqwest::RequestBuilder) -> ClientResult<AuthOutcome> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.json::<UserIdBody>().await.unwrap_or_default();

        Ok(AuthOutcome {
            status,
            user_id: body.user_id,
        })
    }
}
