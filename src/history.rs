//! Session history: an append-only log of completed recommendations.
//!
//! ## Why a session object instead of a process-global list?
//!
//! History is per conversation. A `SessionHistory` is owned by whoever
//! drives the pipeline (one CLI session, one UI tab, one test) and is
//! passed `&mut` through the call chain, so two sessions in the same
//! process can never race or observe each other's entries. It lives until
//! its owner drops it; there is no persistence.

use crate::client::ImageMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One completed query/response pair.
///
/// Immutable once created: constructed by the client after a successful
/// fetch, then only ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The query text that was sent (typed or extracted).
    pub query: String,
    /// Which image flavour was requested.
    pub mode: ImageMode,
    /// The service's JSON payload, passed through opaquely.
    pub images: serde_json::Value,
    /// When the response arrived.
    pub timestamp: DateTime<Utc>,
}

impl Recommendation {
    /// Lift an array-of-strings payload into owned references.
    ///
    /// Returns `None` when the service sent any other shape; callers fall
    /// back to rendering the raw JSON.
    pub fn image_refs(&self) -> Option<Vec<String>> {
        self.images.as_array().map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect()
        })
    }
}

/// Append-only log of [`Recommendation`]s for one session.
///
/// Insertion order is chronological order; nothing is ever removed.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<Recommendation>,
}

impl SessionHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed recommendation.
    pub fn append(&mut self, result: Recommendation) {
        debug!(
            "History entry #{}: {} chars, {}",
            self.entries.len() + 1,
            result.query.len(),
            result.mode
        );
        self.entries.push(result);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Recommendation] {
        &self.entries
    }

    /// Iterate entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.entries.iter()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&Recommendation> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
