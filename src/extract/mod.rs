//! Document readers: turn an uploaded payload into plain query text.
//!
//! Each submodule handles exactly one container format. Keeping formats
//! separate makes each independently testable and lets us swap a parsing
//! backend without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! Document ──▶ plain | docx | pdf ──▶ ExtractedText
//! (payload)    (one reader, by kind)  (newline-joined segments)
//! ```
//!
//! 1. [`plain`] — decode the payload as UTF-8, verbatim
//! 2. [`docx`]  — walk the OOXML paragraph tree in document order
//! 3. [`pdf`]   — extract text per page in page order
//!
//! Whatever the format, the result is the concatenation of the source's
//! textual segments (whole text / paragraphs / pages) joined by `\n`. The
//! reader borrows the payload and has no other side effect.

pub mod docx;
pub mod pdf;
pub mod plain;

use crate::document::{Document, MediaType};
use crate::error::RecommendError;
use tracing::debug;

/// Extract plain text from a document.
///
/// The dispatch is exhaustive over [`MediaType`]: unsupported kinds are
/// rejected when the [`Document`] is constructed, so every payload that
/// reaches this point has a reader.
pub fn extract_text(doc: &Document) -> Result<String, RecommendError> {
    let text = match doc.media_type() {
        MediaType::PlainText => plain::read_plain_text(doc.payload())?,
        MediaType::WordDocument => docx::read_docx_text(doc.payload())?,
        MediaType::Pdf => pdf::read_pdf_text(doc.payload())?,
    };
    debug!(
        "Extracted {} chars from {} payload ({} bytes)",
        text.len(),
        doc.media_type(),
        doc.payload().len()
    );
    Ok(text)
}
