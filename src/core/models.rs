use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Requested flavour of summary. Only affects the LLM prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    Short,
    Detailed,
    #[default]
    Executive,
}

impl SummaryType {
    /// Parse a form value. Unknown values fall back to the default with a
    /// warning instead of failing the request.
    #[must_use]
    pub fn from_form_value(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|reason: String| {
            warn!(value = raw, %reason, "Using default summary_type");
            Self::default()
        })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryType::Short => "short",
            SummaryType::Detailed => "detailed",
            SummaryType::Executive => "executive",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryType {
    type Err = String;

    /// Empty input selects the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "executive" => Ok(SummaryType::Executive),
            "short" => Ok(SummaryType::Short),
            "detailed" => Ok(SummaryType::Detailed),
            other => Err(format!(
                "Unknown summary_type '{other}'; expected one of short, detailed, executive"
            )),
        }
    }
}

/// An uploaded file part.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Browsers submit an empty, unnamed part for an untouched file input.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.filename.is_empty() && self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SummaryRequest {
    pub text: Option<String>,
    pub file: Option<UploadedFile>,
    pub summary_type: SummaryType,
}

/// The structured summary returned by `/summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub purpose: String,
    pub insights: Vec<String>,
    pub risks: Vec<String>,
    pub next_steps: Vec<String>,
    pub notes: Option<Vec<String>>,
    pub model_used: String,
}
