//! Client configuration.
//!
//! All tunables live in one [`ClientConfig`] built via its
//! [`ClientConfigBuilder`]. The base URL of the recommendation service is
//! deliberately NOT defaulted: it points at whatever deployment the operator
//! is running, so it must come from the caller, a CLI flag, or the
//! `IMAGEREC_API_URL` environment variable, never from a hardcoded value.

use crate::error::RecommendError;
use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const API_URL_ENV: &str = "IMAGEREC_API_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the recommendation client.
///
/// # Example
/// ```rust
/// use imagerec::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:8000")
///     .api_timeout_secs(10)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the recommendation service, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 30.
    ///
    /// Applies to both the `/status` probe and the `/recommend_images`
    /// fetch. There is no retry on expiry; the caller sees
    /// [`RecommendError::Timeout`] after exactly one attempt.
    pub api_timeout_secs: u64,
}

impl ClientConfig {
    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            base_url: String::new(),
            api_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Build a config from the process environment.
    ///
    /// Reads the base URL from `IMAGEREC_API_URL`; everything else keeps
    /// its default.
    pub fn from_env() -> Result<Self, RecommendError> {
        let base_url = std::env::var(API_URL_ENV).map_err(|_| {
            RecommendError::InvalidConfig(format!(
                "{API_URL_ENV} is not set; export it or pass --api-url"
            ))
        })?;
        Self::builder().base_url(base_url).build()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    base_url: String,
    api_timeout_secs: u64,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.api_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// A trailing `/` on the base URL is stripped so path concatenation
    /// in the client never produces `//status`.
    pub fn build(self) -> Result<ClientConfig, RecommendError> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(RecommendError::InvalidConfig(
                "base URL must not be empty".into(),
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(RecommendError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        Ok(ClientConfig {
            base_url,
            api_timeout_secs: self.api_timeout_secs,
        })
    }
}
