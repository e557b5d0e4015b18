//! Server-rendered pages
//!
//! Every page that reads or changes board data goes through
//! [`crate::client::ApiClient`] with the visitor's session cookie.

pub mod dashboard;
pub mod home;
pub mod modify;

use crate::client::ClientError;
use axum::http::StatusCode;

pub type PageResult<T> = std::result::Result<T, (StatusCode, String)>;

pub(crate) fn page_error(err: ClientError) -> (StatusCode, String) {
    match err {
        ClientError::Status { status, message } => (status, message),
        ClientError::Http(e) => {
            tracing::error!("API call from page failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
