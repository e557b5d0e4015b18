//! Loopback client for the JSON API
//!
//! The HTML pages never touch the services directly. They reissue every
//! operation against `/api/v1` on the configured base URL, forwarding the
//! visitor's signed session cookie, and act on the status code that comes
//! back.

pub mod category;
pub mod task;
pub mod user;

pub use user::AuthOutcome;

use crate::config::session::USER_ID_COOKIE;
use crate::models::ErrorResponse;
use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API responded {status}: {message}")]
    Status { status: StatusCode, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Redirects are never followed: pages act on the API's own status.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Build a JSON request, attaching the session cookie when given.
    fn request(&self, method: Method, path: &str, session: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(header::CONTENT_TYPE, "application/json");

        match session {
            Some(value) => builder.header(header::COOKIE, format!("{}={}", USER_ID_COOKIE, value)),
            None => builder,
        }
    }

    async fn status_of(&self, builder: RequestBuilder) -> ClientResult<StatusCode> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("API call answered {}", status);
        }
        Ok(status)
    }

    async fn json_of<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = error_for_status(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn error_for_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Err(ClientError::Status { status, message })
}
