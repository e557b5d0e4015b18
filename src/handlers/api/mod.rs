//! JSON API under `/api/v1`

pub mod category;
pub mod task;
pub mod user;

use crate::error::{AppError, Result};
use axum::body::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub type QueryParams = HashMap<String, String>;

/// Decode a JSON body, reporting `message` as a 400 when it does not parse.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &Bytes, message: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("rejected request body: {}", e);
        AppError::Validation(message.to_string())
    })
}

/// Id from the query string, absent when the parameter is missing or blank.
pub(crate) fn optional_id(params: &QueryParams, name: &str) -> Result<Option<i64>> {
    match params.get(name).map(|raw| raw.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("invalid {}", name))),
    }
}

pub(crate) fn required_id(params: &QueryParams, name: &str) -> Result<i64> {
    optional_id(params, name)?.ok_or_else(|| AppError::Validation(format!("{} is empty", name)))
}
