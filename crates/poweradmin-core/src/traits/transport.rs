// # Transport Trait
//
// Defines the seam between the engine and the wire.
//
// ## Implementations
//
// - reqwest/HTTPS: `poweradmin-http` crate
// - In-memory fakes: `poweradmin-core/tests/common`
//
// ## Contract
//
// A transport performs exactly one exchange per `send()` call. It does not
// interpret the response envelope, does not retry, and does not cache:
// status classification and envelope decoding live in
// [`ApiClient`](crate::api::ApiClient) so every transport behaves the same.

use async_trait::async_trait;
use std::fmt;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Upper-case method token
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to the remote API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute path below the base URL, starting with `/api/v2/`,
    /// optionally followed by a query string
    pub path: String,
    /// JSON body, if any
    pub body: Option<serde_json::Value>,
}

/// The undecoded result of one exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Build a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for transport implementations
///
/// # Thread Safety
///
/// Implementations must be usable from concurrent tasks; the engine shares
/// one transport across all entity kinds.
///
/// # Cancellation
///
/// Callers may drop the returned future at any point. Implementations must
/// not spawn work that outlives the future.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one exchange
    ///
    /// # Returns
    ///
    /// - `Ok(RawResponse)`: any HTTP status, including 4xx/5xx
    /// - `Err(Error)`: the exchange itself failed (connection, TLS, timeout)
    async fn send(&self, request: ApiRequest) -> crate::Result<RawResponse>;

    /// Short name for diagnostics (e.g., "http")
    fn transport_name(&self) -> &'static str;
}
