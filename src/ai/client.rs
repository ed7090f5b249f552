//! LLM (`OpenAI` Responses API) client
//!
//! Encapsulates the single outbound call made by the external-model path.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::models::{SummaryResult, SummaryType};
use crate::errors::LlmError;
use crate::prompt::build_summary_prompt;

/// Upper bound on the whole outbound request.
pub const LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// LLM API client for generating summaries
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: String,
}

impl fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmClient")
            .field("api_key", &"<redacted>")
            .field("org_id", &self.org_id)
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        base_url: String,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(api_key, org_id, model_name, base_url, LLM_TIMEOUT)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Http(format!("Failed to build LLM HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            org_id,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for the configured credential, or `None` when the LLM is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, LlmError> {
        let Some(key) = config.api_key() else {
            return Ok(None);
        };
        Self::new(
            key.to_string(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            config.openai_base_url.clone(),
        )
        .map(Some)
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap, LlmError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|e| LlmError::Http(format!("Invalid Authorization header: {e}")))?;
        headers.insert("Authorization", auth_value);

        let content_type_value = "application/json"
            .parse()
            .map_err(|e| LlmError::Http(format!("Invalid Content-Type header: {e}")))?;
        headers.insert("Content-Type", content_type_value);

        if let Some(org) = &self.org_id {
            let org_value = org
                .parse()
                .map_err(|e| LlmError::Http(format!("Invalid OpenAI-Organization header: {e}")))?;
            headers.insert("OpenAI-Organization", org_value);
        }
        Ok(headers)
    }

    /// Summarize `text` with the configured model.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or timeout, a non-success status,
    /// or a response that does not contain the expected JSON object.
    pub async fn summarize(
        &self,
        text: &str,
        summary_type: SummaryType,
    ) -> Result<SummaryResult, LlmError> {
        let prompt = build_summary_prompt(text, summary_type);

        #[cfg(feature = "debug-logs")]
        info!("Using LLM prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            prompt_chars = prompt.chars().count(),
            "Requesting LLM summary"
        );

        let request_body = json!({
            "model": self.model_name,
            "input": [{ "role": "user", "content": prompt }]
        });

        let response = self
            .http
            .post(self.responses_url())
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Http(format!("LLM API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let response_json: Value = serde_json::from_str(&raw)
            .map_err(|e| LlmError::Parse(format!("Response body is not JSON: {e}")))?;

        let output = extract_output_text(&response_json).unwrap_or(raw);
        debug!(output_chars = output.len(), "Received LLM output");

        parse_summary_output(&output, &self.model_name)
    }
}

/// Pull the model's text out of a Responses API payload.
///
/// Prefers the `output_text` convenience field and otherwise joins every
/// `output_text` content part.
#[must_use]
pub fn extract_output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(|v| v.as_str()) {
        return Some(text.to_string());
    }

    let mut collected: Vec<String> = Vec::new();
    if let Some(items) = response_json.get("output").and_then(|o| o.as_array()) {
        for item in items {
            let Some(parts) = item.get("content").and_then(|c| c.as_array()) else {
                continue;
            };
            for p in parts {
                let is_output_text = p
                    .get("type")
                    .and_then(|t| t.as_str())
                    .is_some_and(|t| t == "output_text");
                if !is_output_text {
                    continue;
                }
                if let Some(s) = p.get("text").and_then(|t| t.as_str()) {
                    collected.push(s.to_string());
                } else if let Some(s) = p
                    .get("text")
                    .and_then(|t| t.get("value"))
                    .and_then(|v| v.as_str())
                {
                    collected.push(s.to_string());
                }
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}

/// The span from the first `{` to the last `}`, inclusive.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[derive(Debug, Default, Deserialize)]
struct LlmSummary {
    #[serde(default)]
    purpose: Option<String>,
    #[serde(default)]
    insights: Option<Vec<String>>,
    #[serde(default)]
    risks: Option<Vec<String>>,
    #[serde(default)]
    next_steps: Option<Vec<String>>,
}

/// Parse the JSON object embedded in the model output.
///
/// Missing or `null` keys become empty values.
///
/// # Errors
///
/// Returns `NoJsonObject` when there are no braces and `Parse` when the span
/// is not a JSON object of the expected shape.
pub fn parse_summary_output(output: &str, model_name: &str) -> Result<SummaryResult, LlmError> {
    let body = extract_json_object(output).ok_or(LlmError::NoJsonObject)?;
    let parsed: LlmSummary = serde_json::from_str(body)?;

    Ok(SummaryResult {
        purpose: parsed.purpose.unwrap_or_default(),
        insights: parsed.insights.unwrap_or_default(),
        risks: parsed.risks.unwrap_or_default(),
        next_steps: parsed.next_steps.unwrap_or_default(),
        notes: None,
        model_used: model_name.to_string(),
    })
}
