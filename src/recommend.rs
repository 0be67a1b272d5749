//! Pipeline entry point: input → extraction → status gate → fetch → history.
//!
//! This is the UI-agnostic core the front-end calls once per interaction.
//! It is a single synchronous pass (one status probe, at most one fetch)
//! and owns the invariant that a history entry exists only for a non-empty
//! query that the service actually answered.

use crate::client::{ApiStatus, ImageMode, RecommendClient};
use crate::document::Document;
use crate::error::RecommendError;
use crate::extract;
use crate::history::{Recommendation, SessionHistory};
use tracing::info;

/// What the user submitted: typed text, or a document to extract it from.
#[derive(Debug)]
pub enum QueryInput {
    /// Text typed directly.
    Text(String),
    /// An uploaded document; its extracted text becomes the query.
    Document(Document),
}

/// Run one recommendation pass.
///
/// Steps, in order, each of which may reject the request:
///
/// 1. Resolve the input to query text (document extraction may fail with
///    an ingestion error; no network traffic has happened yet).
/// 2. Reject empty or whitespace-only query text with
///    [`RecommendError::EmptyQuery`].
/// 3. Probe `/status`; anything but [`ApiStatus::Running`] fails with
///    [`RecommendError::ServiceUnavailable`] and no fetch is attempted.
/// 4. Fetch the recommendation; on success append it to `history` and
///    return it.
///
/// A failure at any step leaves `history` untouched.
pub async fn recommend(
    input: QueryInput,
    mode: ImageMode,
    client: &RecommendClient,
    history: &mut SessionHistory,
) -> Result<Recommendation, RecommendError> {
    let query = match input {
        QueryInput::Text(text) => text,
        QueryInput::Document(doc) => extract::extract_text(&doc)?,
    };

    if query.trim().is_empty() {
        return Err(RecommendError::EmptyQuery);
    }

    let status = client.check_status().await;
    if status != ApiStatus::Running {
        info!("Skipping fetch, service status: {status}");
        return Err(RecommendError::ServiceUnavailable { status });
    }

    let result = client.fetch_recommendation(&query, mode).await?;
    history.append(result.clone());
    Ok(result)
}
