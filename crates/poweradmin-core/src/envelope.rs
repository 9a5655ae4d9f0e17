//! Response envelope codec
//!
//! Every API response has the shape
//! `{success, message, data?, error?{code, message, details?}, meta?{timestamp, ...}}`.
//! A non-2xx status is an error whatever the envelope says; a 2xx with
//! `success=false` is an error too. The human-readable message is taken from
//! `error.message`, then `message`, then the raw body.

use crate::error::{Error, Result};
use crate::traits::RawResponse;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Decoded response envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub meta: Option<ApiMeta>,
}

/// Error block of the envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Metadata block of the envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMeta {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Pagination metadata carried by list responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: u32,
}

impl ApiResponse {
    /// Parse an envelope; `None` when the body is empty or not an envelope
    pub fn parse(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        serde_json::from_str(body).ok()
    }

    /// Best available human-readable message
    fn message_or(&self, raw: &str) -> String {
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .filter(|m| !m.is_empty())
            .or(self.message.as_deref().filter(|m| !m.is_empty()))
            .unwrap_or(raw)
            .to_string()
    }

    /// True when the error block reports a 404
    fn reports_not_found(&self) -> bool {
        self.error.as_ref().and_then(|e| e.code) == Some(404)
    }

    /// Decode `data` into `T`; `None` when absent or `null`
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.data {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => Ok(Some(T::deserialize(value)?)),
        }
    }
}

/// Classify a failed exchange into the error taxonomy
fn rejection(status: u16, envelope: Option<&ApiResponse>, raw: &str) -> Error {
    let message = match envelope {
        Some(env) => env.message_or(raw),
        None => raw.to_string(),
    };
    let not_found = status == 404 || envelope.is_some_and(ApiResponse::reports_not_found);
    if not_found {
        Error::not_found(message)
    } else {
        Error::remote(status, message)
    }
}

/// Check status and `success`, returning the envelope on success
///
/// An empty 2xx body (e.g. `204 No Content`) yields an empty envelope.
pub fn check(raw: &RawResponse) -> Result<ApiResponse> {
    let envelope = ApiResponse::parse(&raw.body);

    if !raw.is_success() {
        return Err(rejection(raw.status, envelope.as_ref(), &raw.body));
    }

    match envelope {
        Some(env) if env.success => Ok(env),
        Some(env) => Err(rejection(raw.status, Some(&env), &raw.body)),
        None if raw.body.trim().is_empty() => Ok(ApiResponse {
            success: true,
            ..Default::default()
        }),
        None => Err(Error::invalid_response(format!(
            "failed to parse API response: {}",
            truncate(&raw.body, 200)
        ))),
    }
}

/// Check the exchange and decode `data` into `T`
///
/// Absent `data` is not an error: endpoints that do not echo the entity
/// return `Ok(None)`.
pub fn decode<T: DeserializeOwned>(raw: &RawResponse) -> Result<Option<T>> {
    check(raw)?.data_as()
}

/// Truncate `s` to at most `max` bytes on a char boundary
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
