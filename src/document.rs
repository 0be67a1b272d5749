//! Document payloads and their declared media types.
//!
//! ## Why a tagged union instead of dispatching on MIME strings?
//!
//! The reader must never see a kind it cannot handle. By rejecting unknown
//! media types here, at construction, a [`Document`] value always carries
//! one of the three supported kinds and the extraction dispatch can be an
//! exhaustive `match`. Adding a fourth format later is a compile error at
//! every site that forgot about it, not a silent fallthrough.

use crate::error::RecommendError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// MIME type accepted for plain-text uploads.
pub const MIME_PLAIN_TEXT: &str = "text/plain";
/// MIME type accepted for word-processor uploads.
pub const MIME_WORD_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// MIME type accepted for PDF uploads.
pub const MIME_PDF: &str = "application/pdf";

/// The three document kinds the reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    /// UTF-8 plain text (`text/plain`).
    PlainText,
    /// OOXML word-processor document (`.docx`).
    WordDocument,
    /// Portable Document Format.
    Pdf,
}

impl MediaType {
    /// The canonical MIME string for this kind.
    pub const fn mime(self) -> &'static str {
        match self {
            MediaType::PlainText => MIME_PLAIN_TEXT,
            MediaType::WordDocument => MIME_WORD_DOCUMENT,
            MediaType::Pdf => MIME_PDF,
        }
    }

    /// Map a declared MIME string to a supported kind.
    ///
    /// Parameters after `;` (e.g. `text/plain; charset=utf-8`) are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        match essence {
            MIME_PLAIN_TEXT => Some(MediaType::PlainText),
            MIME_WORD_DOCUMENT => Some(MediaType::WordDocument),
            MIME_PDF => Some(MediaType::Pdf),
            _ => None,
        }
    }

    /// Map a file extension (without the dot, any case) to a supported kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(MediaType::PlainText),
            "docx" => Some(MediaType::WordDocument),
            "pdf" => Some(MediaType::Pdf),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaType::PlainText => "plain-text",
            MediaType::WordDocument => "word-processor",
            MediaType::Pdf => "PDF",
        })
    }
}

/// An uploaded document: raw payload plus its declared kind.
///
/// Immutable once constructed; the reader borrows the payload and never
/// retains it beyond the extraction call.
#[derive(Debug, Clone)]
pub struct Document {
    media_type: MediaType,
    payload: Vec<u8>,
}

impl Document {
    /// Wrap a payload whose kind is already known.
    pub fn new(media_type: MediaType, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            media_type,
            payload: payload.into(),
        }
    }

    /// Construct from a payload and the uploader's declared MIME type.
    ///
    /// Rejects anything outside the three supported types before any
    /// extraction or network activity happens.
    pub fn from_declared_type(
        mime: &str,
        payload: impl Into<Vec<u8>>,
    ) -> Result<Self, RecommendError> {
        let media_type = MediaType::from_mime(mime).ok_or_else(|| {
            RecommendError::UnsupportedType {
                media_type: mime.to_string(),
            }
        })?;
        Ok(Self::new(media_type, payload))
    }

    /// Read a document from disk, inferring the kind from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RecommendError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let media_type = MediaType::from_extension(ext).ok_or_else(|| {
            RecommendError::UnsupportedType {
                media_type: path.display().to_string(),
            }
        })?;
        let payload = std::fs::read(path).map_err(|source| RecommendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(media_type, payload))
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}
