//! API request handlers.

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, State, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};
use tracing::{info, warn};

use super::types::{ApiState, HealthResponse, SummarizeForm};
use crate::core::models::{SummaryRequest, SummaryResult, SummaryType, UploadedFile};
use crate::errors::SummarizeError;
use crate::input::resolve_text;

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Summarize endpoint handler.
///
/// POST /summarize
///
/// Accepts `multipart/form-data` or `application/x-www-form-urlencoded` with:
/// - `text` (optional): pasted content
/// - `file` (optional, multipart only): a `.txt` upload, preferred over `text`
/// - `summary_type` (optional): `short`, `detailed` or `executive` (default);
///   anything else is treated as `executive`
///
/// Once the input is valid this always answers 200: LLM failures degrade to
/// the heuristic summary.
///
/// # Errors
///
/// Returns 400 for missing input, a non-`.txt` upload or an undecodable body,
/// 413 for an oversize body and 415 for other content types.
#[tracing::instrument(
    level = "info",
    skip_all,
    fields(request_id = %uuid::Uuid::new_v4())
)]
pub async fn summarize_handler(
    State(state): State<ApiState>,
    request: Request,
) -> Result<Json<SummaryResult>, SummarizeError> {
    let summary_request = read_summary_request(request, &state).await.inspect_err(|e| {
        warn!(error = %e, "Rejected summarize request body");
    })?;

    let text = resolve_text(&summary_request).inspect_err(|e| {
        warn!(error = %e, "Rejected summarize input");
    })?;

    info!(
        summary_type = %summary_request.summary_type,
        text_chars = text.chars().count(),
        from_file = summary_request.file.is_some(),
        "Summarizing"
    );

    let summary = state
        .producer()
        .produce(&text, summary_request.summary_type)
        .await;

    Ok(Json(summary))
}

/// Decode the request body into a [`SummaryRequest`] based on its content type.
async fn read_summary_request(
    request: Request,
    state: &ApiState,
) -> Result<SummaryRequest, SummarizeError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| SummarizeError::MalformedForm(e.body_text()))?;
        return read_multipart(multipart).await;
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<SummarizeForm>::from_request(request, state)
            .await
            .map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    SummarizeError::PayloadTooLarge(e.body_text())
                } else {
                    SummarizeError::MalformedForm(e.body_text())
                }
            })?;
        return Ok(SummaryRequest {
            text: form.text,
            file: None,
            summary_type: SummaryType::from_form_value(
                form.summary_type.as_deref().unwrap_or(""),
            ),
        });
    }

    let shown = if content_type.is_empty() {
        "missing".to_string()
    } else {
        content_type
    };
    Err(SummarizeError::UnsupportedMediaType(format!(
        "{shown}; send multipart/form-data or application/x-www-form-urlencoded"
    )))
}

async fn read_multipart(mut multipart: Multipart) -> Result<SummaryRequest, SummarizeError> {
    let mut request = SummaryRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "text" => {
                let data = field.bytes().await.map_err(multipart_error)?;
                request.text = Some(String::from_utf8_lossy(&data).into_owned());
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                request.file = Some(UploadedFile::new(file_name, data.to_vec()));
            }
            "summary_type" => {
                let data = field.bytes().await.map_err(multipart_error)?;
                request.summary_type =
                    SummaryType::from_form_value(&String::from_utf8_lossy(&data));
            }
            _ => {}
        }
    }

    Ok(request)
}

fn multipart_error(e: MultipartError) -> SummarizeError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SummarizeError::PayloadTooLarge(e.body_text())
    } else {
        SummarizeError::MalformedForm(e.body_text())
    }
}
