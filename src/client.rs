//! HTTP client for the recommendation service.
//!
//! Two endpoints, two calls:
//!
//! * `GET {base_url}/status` — a health probe whose JSON `status` field
//!   gates the pipeline ([`RecommendClient::check_status`]).
//! * `GET {base_url}/recommend_images?query=…&use_ai=…` — the actual
//!   recommendation fetch ([`RecommendClient::fetch_recommendation`]).
//!
//! Every invocation performs exactly one network round trip: no retry, no
//! backoff, no caching. The response payload is returned opaquely; the
//! client never interprets image bytes, rendering belongs to whatever
//! front-end sits on top.

use crate::config::ClientConfig;
use crate::error::RecommendError;
use crate::history::Recommendation;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The `status` field value the service reports when healthy.
const STATUS_RUNNING_BODY: &str = "API is running";

/// Health of the remote service, as seen from the last `/status` probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiStatus {
    /// The service answered `"API is running"`.
    Running,
    /// The probe failed outright (transport error or non-2xx).
    NotAvailable,
    /// The service answered, but not with the expected body.
    UnknownStatus,
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApiStatus::Running => "Running",
            ApiStatus::NotAvailable => "Not Available",
            ApiStatus::UnknownStatus => "Unknown Status",
        })
    }
}

/// Which flavour of image the service should recommend.
///
/// An explicit enumeration: there is no implicit "anything else means
/// stock" fallback, and the wire flag is derived from the variant alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMode {
    /// AI-generated images (`use_ai=true`).
    Ai,
    /// Stock images (`use_ai=false`).
    Stock,
}

impl ImageMode {
    /// The `use_ai` query-parameter value for this mode.
    pub const fn use_ai(self) -> bool {
        matches!(self, ImageMode::Ai)
    }
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageMode::Ai => "AI",
            ImageMode::Stock => "Stock Images",
        })
    }
}

/// Client for the remote recommendation service.
pub struct RecommendClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RecommendClient {
    /// Build a client over the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, RecommendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| RecommendError::Unexpected {
                detail: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { http, config })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Probe `/status` and classify the answer.
    ///
    /// Infallible by design: the status is a gate value shown to the user,
    /// not an error. A dead host is a perfectly valid answer here.
    pub async fn check_status(&self) -> ApiStatus {
        let url = format!("{}/status", self.config.base_url);
        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("Status probe failed: {e}");
                return ApiStatus::NotAvailable;
            }
        };

        if !response.status().is_success() {
            debug!("Status probe returned HTTP {}", response.status());
            return ApiStatus::NotAvailable;
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => status_from_body(&body),
            Err(e) => {
                debug!("Status body was not JSON: {e}");
                ApiStatus::UnknownStatus
            }
        }
    }

    /// Fetch an image recommendation for `query`.
    ///
    /// Exactly one `GET /recommend_images` round trip. On success the JSON
    /// payload is wrapped in a timestamped [`Recommendation`]; the payload
    /// shape is defined by the service and passed through untouched.
    pub async fn fetch_recommendation(
        &self,
        query: &str,
        mode: ImageMode,
    ) -> Result<Recommendation, RecommendError> {
        let url = format!("{}/recommend_images", self.config.base_url);
        info!("Requesting {} recommendation ({} chars)", mode, query.len());

        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("use_ai", if mode.use_ai() { "true" } else { "false" }),
            ])
            .send()
            .await
            .map_err(|e| self.classify_send_error(e, &url))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Recommendation fetch returned HTTP {status}");
            return Err(RecommendError::Http {
                status: status.as_u16(),
            });
        }

        let images: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| RecommendError::Unexpected {
                    detail: format!("response body is not JSON: {e}"),
                })?;

        debug!("Recommendation payload: {images}");
        Ok(Recommendation {
            query: query.to_owned(),
            mode,
            images,
            timestamp: Utc::now(),
        })
    }

    /// Map a reqwest transport error onto the failure taxonomy.
    fn classify_send_error(&self, e: reqwest::Error, url: &str) -> RecommendError {
        if e.is_timeout() {
            RecommendError::Timeout {
                secs: self.config.api_timeout_secs,
            }
        } else if e.is_connect() {
            RecommendError::Connection {
                url: url.to_owned(),
                detail: e.to_string(),
            }
        } else {
            RecommendError::Unexpected {
                detail: e.to_string(),
            }
        }
    }
}

/// Classify a 2xx `/status` JSON body.
fn status_from_body(body: &serde_json::Value) -> ApiStatus {
    match body.get("status").and_then(|v| v.as_str()) {
        Some(STATUS_RUNNING_BODY) => ApiStatus::Running,
        _ => ApiStatus::UnknownStatus,
    }
}
