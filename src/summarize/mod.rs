//! Summary producer: external model when configured, heuristic otherwise.

pub mod heuristic;

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::ai::LlmClient;
use crate::core::config::AppConfig;
use crate::core::models::{SummaryResult, SummaryType};

pub use heuristic::{HEURISTIC_MODEL, heuristic_summary};

/// Produces a [`SummaryResult`] for already-validated text.
#[derive(Debug, Clone, Default)]
pub struct SummaryProducer {
    llm: Option<LlmClient>,
}

impl SummaryProducer {
    #[must_use]
    pub fn heuristic_only() -> Self {
        Self { llm: None }
    }

    #[must_use]
    pub fn with_llm(llm: LlmClient) -> Self {
        Self { llm: Some(llm) }
    }

    /// Producer for the given configuration. A client that cannot be built
    /// leaves the producer in heuristic-only mode.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        match LlmClient::from_config(config) {
            Ok(llm) => Self { llm },
            Err(e) => {
                warn!(error = %e, "LLM client unavailable; using heuristic summaries");
                Self::heuristic_only()
            }
        }
    }

    #[must_use]
    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Summarize `text`. Never fails: any LLM failure falls back to the
    /// heuristic summary.
    pub async fn produce(&self, text: &str, summary_type: SummaryType) -> SummaryResult {
        let Some(llm) = &self.llm else {
            info!("LLM disabled; producing heuristic summary");
            return heuristic_summary(text);
        };

        match llm.summarize(text, summary_type).await {
            Ok(summary) => {
                info!(model = %summary.model_used, "LLM summary produced");
                summary
            }
            Err(e) => {
                warn!(error = %e, "LLM summary failed; falling back to heuristic");
                heuristic_summary(text)
            }
        }
    }
}

/// Keeps the producer built for the most recent [`AppConfig`], so requests
/// share one HTTP client until the configuration changes.
#[derive(Debug, Default)]
pub struct ProducerCache {
    current: Mutex<Option<(AppConfig, Arc<SummaryProducer>)>>,
}

impl ProducerCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Producer for `config`, rebuilt only when `config` differs from the
    /// one the cached producer was built from.
    pub fn producer_for(&self, config: &AppConfig) -> Arc<SummaryProducer> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((cached_config, producer)) = current.as_ref() {
            if cached_config == config {
                return Arc::clone(producer);
            }
            debug!("Summarizer configuration changed; rebuilding producer");
        }

        let producer = Arc::new(SummaryProducer::from_config(config));
        *current = Some((config.clone(), Arc::clone(&producer)));
        producer
    }
}
