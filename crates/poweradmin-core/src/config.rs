//! Client configuration
//!
//! Connection settings for the Poweradmin API. Authentication is chosen once,
//! when the transport is built from a [`ClientConfig`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable names read by [`ClientConfig::from_lookup`]
pub mod env {
    pub const API_URL: &str = "POWERADMIN_API_URL";
    pub const API_KEY: &str = "POWERADMIN_API_KEY";
    pub const USERNAME: &str = "POWERADMIN_USERNAME";
    pub const PASSWORD: &str = "POWERADMIN_PASSWORD";
    pub const INSECURE: &str = "POWERADMIN_INSECURE";
    pub const API_VERSION: &str = "POWERADMIN_API_VERSION";
    pub const TIMEOUT_SECS: &str = "POWERADMIN_TIMEOUT_SECS";
}

/// The only API version this client speaks
pub const SUPPORTED_API_VERSION: &str = "v2";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound for the HTTP timeout
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// API client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Poweradmin installation (e.g. `https://dns.example.com`)
    pub api_url: String,

    /// Authentication scheme
    pub auth: AuthConfig,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,

    /// API version (only `v2` is supported)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_version() -> String {
    SUPPORTED_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Authentication scheme
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// `Authorization: Bearer <key>` plus `X-API-Key: <key>`
    ApiKey { api_key: String },

    /// HTTP basic credentials
    Basic { username: String, password: String },
}

impl ClientConfig {
    /// Create a configuration with default version and timeout
    pub fn new(api_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            api_url: api_url.into(),
            auth,
            insecure: false,
            api_version: default_api_version(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Base URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::config("API URL cannot be empty"));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(Error::config(format!(
                "API URL must start with http:// or https:// (got '{}')",
                self.api_url
            )));
        }
        if self.api_version != SUPPORTED_API_VERSION {
            return Err(Error::config(format!(
                "unsupported API version '{}' (only '{}' is supported)",
                self.api_version, SUPPORTED_API_VERSION
            )));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(Error::config(format!(
                "timeout must be between 1 and {} seconds (got {})",
                MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }
        self.auth.validate()
    }

    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    ///
    /// An API key takes precedence over basic credentials when both are set.
    /// The result is validated before it is returned.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get(env::API_URL)
            .ok_or_else(|| Error::config(format!("{} is required", env::API_URL)))?;

        let auth = match (get(env::API_KEY), get(env::USERNAME), get(env::PASSWORD)) {
            (Some(api_key), _, _) => AuthConfig::ApiKey { api_key },
            (None, Some(username), Some(password)) => AuthConfig::Basic { username, password },
            (None, Some(_), None) => {
                return Err(Error::config(format!(
                    "{} is required when {} is set",
                    env::PASSWORD,
                    env::USERNAME
                )));
            }
            _ => {
                return Err(Error::config(format!(
                    "either {} or {}/{} must be set",
                    env::API_KEY,
                    env::USERNAME,
                    env::PASSWORD
                )));
            }
        };

        let insecure = match get(env::INSECURE) {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| Error::config(format!("{} must be a boolean (got '{}')", env::INSECURE, v)))?,
            None => false,
        };

        let timeout_secs = match get(env::TIMEOUT_SECS) {
            Some(v) => v.trim().parse::<u64>().map_err(|_| {
                Error::config(format!("{} must be an integer (got '{}')", env::TIMEOUT_SECS, v))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            api_url,
            auth,
            insecure,
            api_version: get(env::API_VERSION).unwrap_or_else(default_api_version),
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

impl AuthConfig {
    /// Validate the credentials are complete
    pub fn validate(&self) -> Result<()> {
        match self {
            AuthConfig::ApiKey { api_key } => {
                if api_key.is_empty() {
                    return Err(Error::config("API key cannot be empty"));
                }
            }
            AuthConfig::Basic { username, password } => {
                if username.is_empty() || password.is_empty() {
                    return Err(Error::config(
                        "basic authentication requires both username and password",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Scheme name for diagnostics
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthConfig::ApiKey { .. } => "api_key",
            AuthConfig::Basic { .. } => "basic",
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("auth", &self.auth)
            .field("insecure", &self.insecure)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthConfig::ApiKey { .. } => f
                .debug_struct("ApiKey")
                .field("api_key", &"<REDACTED>")
                .finish(),
            AuthConfig::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<REDACTED>")
                .finish(),
        }
    }
}
