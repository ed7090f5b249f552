//! Turns a summarize request into the single text payload to summarize.

use crate::core::models::{SummaryRequest, UploadedFile};
use crate::errors::SummarizeError;

pub const MISSING_INPUT_MESSAGE: &str = "Provide text or a file (.txt) to summarize.";
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Only .txt accepted; use the text field for other content.";

const ACCEPTED_EXTENSION: &str = ".txt";

/// Resolve the effective text of a request.
///
/// An uploaded file wins over pasted text when both are present.
///
/// # Errors
///
/// Returns `InvalidInput` when neither input carries content and
/// `UnsupportedFormat` when the uploaded file is not a `.txt`.
pub fn resolve_text(request: &SummaryRequest) -> Result<String, SummarizeError> {
    let text = request.text.as_deref().filter(|t| !t.is_empty());
    let file = request.file.as_ref().filter(|f| !f.is_blank());

    let effective = match (file, text) {
        (Some(file), _) => decode_text_file(file)?,
        (None, Some(text)) => text.to_string(),
        (None, None) => {
            return Err(SummarizeError::InvalidInput(MISSING_INPUT_MESSAGE.to_string()));
        }
    };

    if effective.is_empty() {
        return Err(SummarizeError::InvalidInput(MISSING_INPUT_MESSAGE.to_string()));
    }

    Ok(effective)
}

/// Decode a `.txt` upload, replacing invalid UTF-8 rather than failing.
///
/// # Errors
///
/// Returns `UnsupportedFormat` for any other extension.
pub fn decode_text_file(file: &UploadedFile) -> Result<String, SummarizeError> {
    if !is_plain_text_name(&file.filename) {
        return Err(SummarizeError::UnsupportedFormat(
            UNSUPPORTED_FORMAT_MESSAGE.to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(&file.bytes).into_owned())
}

#[must_use]
pub fn is_plain_text_name(filename: &str) -> bool {
    filename
        .trim()
        .to_ascii_lowercase()
        .ends_with(ACCEPTED_EXTENSION)
}
