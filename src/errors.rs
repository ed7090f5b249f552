use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to the caller of `/summarize`.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("Failed to read form body: {0}")]
    MalformedForm(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedMediaType(String),
}

impl SummarizeError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            SummarizeError::InvalidInput(_)
            | SummarizeError::UnsupportedFormat(_)
            | SummarizeError::MalformedForm(_) => StatusCode::BAD_REQUEST,
            SummarizeError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            SummarizeError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }
}

impl IntoResponse for SummarizeError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Failure kinds of the external-model path.
///
/// These never reach the caller: the producer logs them and falls back to the
/// heuristic summary.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("LLM API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse LLM response: {0}")]
    Parse(String),

    #[error("No JSON object found in LLM output")]
    NoJsonObject,
}

impl From<reqwest::Error> for LlmError {
    fn from(error: reqwest::Error) -> Self {
        LlmError::Http(error.to_string())
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(error: serde_json::Error) -> Self {
        LlmError::Parse(error.to_string())
    }
}
