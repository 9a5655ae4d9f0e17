//! Versioned API client
//!
//! Wraps a [`Transport`] with the pieces every entity operation shares:
//! the `/api/v2/` path prefix, cancellation through [`RequestContext`],
//! envelope decoding and status classification, and one diagnostic event
//! per exchange.

use crate::context::RequestContext;
use crate::envelope::{self, ApiResponse};
use crate::error::{Error, Result};
use crate::traits::{ApiRequest, Method, RawResponse, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Fixed versioned API root
pub const API_ROOT: &str = "/api/v2";

/// Maximum number of body bytes included in diagnostic events
pub const LOG_BODY_LIMIT: usize = 512;

/// Shared, cheaply cloneable API client
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("transport", &self.transport.transport_name())
            .finish()
    }
}

impl ApiClient {
    /// Create a client over an existing transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build the absolute path for a caller-relative one
    ///
    /// The relative path is appended as-is; name and type segments are never
    /// re-encoded here.
    pub fn path(relative: &str) -> String {
        format!("{}/{}", API_ROOT, relative.trim_start_matches('/'))
    }

    /// Perform one exchange without interpreting the envelope
    ///
    /// # Parameters
    ///
    /// - `ctx`: cancellation and deadline for this call
    /// - `method`: HTTP method
    /// - `relative`: path below the API root, e.g. `zones/7`
    /// - `body`: optional JSON body
    pub async fn send_raw(
        &self,
        ctx: &RequestContext,
        method: Method,
        relative: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse> {
        let request = ApiRequest {
            method,
            path: Self::path(relative),
            body,
        };
        let path = request.path.clone();

        let response = ctx.run(self.transport.send(request)).await?;

        debug!(
            method = %method,
            path = %path,
            status = response.status,
            body = %envelope::truncate(&response.body, LOG_BODY_LIMIT),
            "API response"
        );

        Ok(response)
    }

    /// Perform one exchange and check the envelope
    pub async fn exchange(
        &self,
        ctx: &RequestContext,
        method: Method,
        relative: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse> {
        let raw = self.send_raw(ctx, method, relative, body).await?;
        envelope::check(&raw)
    }

    /// Perform one exchange and decode `data`
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: `data` was present and decoded
    /// - `Ok(None)`: the call succeeded without a `data` payload
    /// - `Err(Error)`: transport failure, rejection, or undecodable `data`
    pub async fn request<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        method: Method,
        relative: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>> {
        self.exchange(ctx, method, relative, body).await?.data_as()
    }

    /// `GET` and decode
    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        relative: &str,
    ) -> Result<Option<T>> {
        self.request(ctx, Method::Get, relative, None).await
    }

    /// `GET` and decode, treating absent `data` as an invalid response
    pub async fn get_required<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        relative: &str,
    ) -> Result<T> {
        self.get(ctx, relative).await?.ok_or_else(|| {
            Error::invalid_response(format!("GET {} returned no data", Self::path(relative)))
        })
    }

    /// `POST` a serializable body and decode
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        relative: &str,
        body: &B,
    ) -> Result<Option<T>> {
        let body = serde_json::to_value(body)?;
        self.request(ctx, Method::Post, relative, Some(body)).await
    }

    /// `PUT` a serializable body and decode
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        relative: &str,
        body: &B,
    ) -> Result<Option<T>> {
        let body = serde_json::to_value(body)?;
        self.request(ctx, Method::Put, relative, Some(body)).await
    }

    /// `DELETE`, optionally with a body
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        relative: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        self.exchange(ctx, Method::Delete, relative, body).await?;
        Ok(())
    }
}
