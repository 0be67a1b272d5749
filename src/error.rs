//! Error types for the imagerec library.
//!
//! One enum covers the whole pipeline, grouped by the boundary where the
//! failure occurs:
//!
//! * **Document ingestion** — the payload could not be turned into query
//!   text. No network call is made after one of these.
//! * **Recommendation service** — the HTTP round trip failed. The session
//!   history is never mutated after one of these.
//! * **Pipeline** — the precondition gates (non-empty query, service
//!   running) rejected the request before any fetch.
//!
//! Every variant is reportable and non-fatal: the caller shows the message
//! and the user may retry. Nothing here is retried automatically.

use crate::client::ApiStatus;
use crate::document::MediaType;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the imagerec library.
#[derive(Debug, Error)]
pub enum RecommendError {
    // ── Document ingestion ────────────────────────────────────────────────
    /// The declared media type is not one of the three supported kinds.
    #[error("Unsupported media type '{media_type}'\nSupported: text/plain, \
             application/vnd.openxmlformats-officedocument.wordprocessingml.document, \
             application/pdf")]
    UnsupportedType { media_type: String },

    /// A plain-text payload contained invalid UTF-8.
    #[error("Text payload is not valid UTF-8 (first invalid byte at offset {offset})")]
    Decode { offset: usize },

    /// The document container could not be parsed (malformed or encrypted).
    #[error("Malformed {media_type} document: {detail}")]
    Parse {
        media_type: MediaType,
        detail: String,
    },

    /// A file-backed document could not be read from disk.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Recommendation service ────────────────────────────────────────────
    /// The service answered with a non-2xx status code.
    #[error("Recommendation service returned HTTP {status}")]
    Http { status: u16 },

    /// The host could not be reached at all.
    #[error("Could not reach recommendation service at '{url}': {detail}")]
    Connection { url: String, detail: String },

    /// No response arrived within the configured timeout.
    #[error("Recommendation service did not respond within {secs}s\nIncrease --timeout or check the service.")]
    Timeout { secs: u64 },

    /// Anything else that went wrong during the round trip,
    /// including a 2xx response whose body is not JSON.
    #[error("Unexpected error talking to the recommendation service: {detail}")]
    Unexpected { detail: String },

    // ── Pipeline ──────────────────────────────────────────────────────────
    /// The query text was empty (or whitespace-only) after extraction.
    #[error("Query text is empty\nType some text or provide a non-empty document.")]
    EmptyQuery,

    /// The status gate rejected the request; no fetch was attempted.
    #[error("Recommendation service is not running (status: {status})")]
    ServiceUnavailable { status: ApiStatus },

    // ── Config ────────────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
