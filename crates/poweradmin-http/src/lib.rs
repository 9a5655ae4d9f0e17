// # Poweradmin HTTP Transport
//
// `Transport` implementation over reqwest for the Poweradmin REST API v2.
//
// ## Responsibilities
//
// - Build one HTTP request per `send()` call: method, URL, JSON body
// - Attach authentication (API key or basic credentials)
// - Return status and body unchanged; envelope handling lives in `poweradmin-core`
//
// ## Not Responsible For
//
// - Retries or backoff (a failed exchange is reported as-is)
// - Cancellation (the caller's `RequestContext` drops the in-flight future)
// - Response classification
//
// ## Security
//
// - Credentials NEVER appear in logs or `Debug` output
// - TLS verification can be disabled with `insecure`, for lab setups only

use async_trait::async_trait;
use poweradmin_core::config::{AuthConfig, ClientConfig};
use poweradmin_core::{ApiClient, ApiRequest, Error, Method, RawResponse, Result, Transport};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::{trace, warn};

/// Header carrying the API key, sent alongside the bearer token
const API_KEY_HEADER: &str = "X-API-Key";

const USER_AGENT: &str = concat!("poweradmin-http/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    auth: AuthConfig,
}

// Custom Debug implementation that hides credentials
impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.scheme())
            .field("credentials", &"<REDACTED>")
            .finish()
    }
}

impl HttpTransport {
    /// Build a transport from a validated configuration
    ///
    /// # Parameters
    ///
    /// - `config`: API URL, authentication, TLS and timeout settings
    ///
    /// # Returns
    ///
    /// - `Ok(HttpTransport)`: ready to send
    /// - `Err(Error::Config)`: invalid configuration or client construction failure
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if config.insecure {
            warn!(api_url = %config.base_url(), "TLS certificate verification is disabled");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure)
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            auth: config.auth.clone(),
        })
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            AuthConfig::ApiKey { api_key } => builder
                .bearer_auth(api_key)
                .header(API_KEY_HEADER, api_key),
            AuthConfig::Basic { username, password } => builder.basic_auth(username, Some(password)),
        }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        trace!(method = %request.method, url = %url, "Sending request");

        let mut builder = self.authorize(self.client.request(to_reqwest(request.method), &url));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(format!("{} {} timed out", request.method, request.path))
            } else {
                Error::transport(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(format!("{} {} timed out reading the body", request.method, request.path))
            } else {
                Error::transport(format!("failed to read response body: {}", e))
            }
        })?;

        Ok(RawResponse::new(status, body))
    }

    fn transport_name(&self) -> &'static str {
        "http"
    }
}

/// Build an [`ApiClient`] over an [`HttpTransport`]
pub fn client_from_config(config: &ClientConfig) -> Result<ApiClient> {
    Ok(ApiClient::new(Arc::new(HttpTransport::new(config)?)))
}
