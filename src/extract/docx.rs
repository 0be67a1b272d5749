//! Word-processor reader: walk the OOXML paragraph tree with docx-rs.
//!
//! A `.docx` file is a ZIP archive of XML parts; docx-rs parses it into a
//! typed tree. Text lives at the leaves:
//!
//! ```text
//! Document ─▶ Paragraph ─▶ Run ─▶ Text
//! ```
//!
//! We collect the text of every run in every paragraph, in document order,
//! one string per paragraph, and join the paragraphs with `\n`. Paragraphs
//! with no runs contribute an empty segment, preserving the document's
//! vertical structure.

use crate::document::MediaType;
use crate::error::RecommendError;
use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

/// Extract the paragraph text of a `.docx` payload, newline-joined.
pub(crate) fn read_docx_text(payload: &[u8]) -> Result<String, RecommendError> {
    let docx = read_docx(payload).map_err(|e| RecommendError::Parse {
        media_type: MediaType::WordDocument,
        detail: e.to_string(),
    })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Concatenate the text runs of a single paragraph.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}
