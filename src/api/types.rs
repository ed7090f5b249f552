//! API state and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::config::AppConfig;
use crate::summarize::{ProducerCache, SummaryProducer};

/// Where handlers get their [`AppConfig`] from.
#[derive(Debug, Clone, Default)]
pub enum ConfigSource {
    /// Re-read the environment on every request, so a changed credential is
    /// picked up without a restart.
    #[default]
    Env,
    /// Use a config fixed at router construction.
    Fixed(Arc<AppConfig>),
}

impl ConfigSource {
    #[must_use]
    pub fn resolve(&self) -> Arc<AppConfig> {
        match self {
            ConfigSource::Env => Arc::new(AppConfig::from_env()),
            ConfigSource::Fixed(config) => Arc::clone(config),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiState {
    pub config: ConfigSource,
    pub producers: Arc<ProducerCache>,
}

impl ApiState {
    #[must_use]
    pub fn new(config: ConfigSource) -> Self {
        Self {
            config,
            producers: Arc::new(ProducerCache::new()),
        }
    }

    /// Producer for the current configuration. Under [`ConfigSource::Env`]
    /// the environment is re-read, but the client is only rebuilt when a
    /// value changed.
    #[must_use]
    pub fn producer(&self) -> Arc<SummaryProducer> {
        self.producers.producer_for(&self.config.resolve())
    }
}

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Url-encoded `/summarize` body. Files require multipart.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeForm {
    pub text: Option<String>,
    pub summary_type: Option<String>,
}
