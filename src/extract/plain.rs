//! Plain-text reader: UTF-8 decode, nothing more.

use crate::error::RecommendError;

/// Decode a `text/plain` payload as UTF-8, verbatim.
///
/// No trimming, no newline normalisation: the uploaded bytes ARE the
/// query text. Invalid sequences fail with [`RecommendError::Decode`]
/// carrying the offset of the first bad byte.
pub(crate) fn read_plain_text(payload: &[u8]) -> Result<String, RecommendError> {
    match std::str::from_utf8(payload) {
        Ok(text) => Ok(text.to_owned()),
        Err(e) => Err(RecommendError::Decode {
            offset: e.valid_up_to(),
        }),
    }
}
