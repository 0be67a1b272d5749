//! PDF reader: per-page text extraction with pdf-extract.
//!
//! Pages are extracted in page order and joined with `\n`, mirroring how
//! the other readers join their segments. Malformed and encrypted
//! containers surface as [`RecommendError::Parse`].
//!
//! The underlying parser is known to panic on some hostile payloads, so
//! the call runs under `catch_unwind` and a panic is reported as a parse
//! failure like any other; an upload must never take the process down.

use crate::document::MediaType;
use crate::error::RecommendError;
use std::panic;

/// Extract the text of every page of a PDF payload, newline-joined.
pub(crate) fn read_pdf_text(payload: &[u8]) -> Result<String, RecommendError> {
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(payload))
        .map_err(|cause| RecommendError::Parse {
            media_type: MediaType::Pdf,
            detail: panic_detail(cause.as_ref()),
        })?
        .map_err(|e| RecommendError::Parse {
            media_type: MediaType::Pdf,
            detail: e.to_string(),
        })?;

    Ok(pages.join("\n"))
}

/// Best-effort message from a caught panic payload.
fn panic_detail(cause: &(dyn std::any::Any + Send)) -> String {
    cause
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "text extraction panicked".to_string())
}
