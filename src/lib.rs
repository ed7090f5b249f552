//! Boom Summarizer - an HTTP service that turns pasted text or a `.txt` upload
//! into a structured summary (purpose, insights, risks, next steps).
//!
//! # Architecture
//!
//! Each request flows through two stateless steps:
//! 1. The input resolver (`input`) picks the effective text: an uploaded `.txt`
//!    file wins over the `text` field
//! 2. The summary producer (`summarize`) asks an LLM via the `OpenAI`
//!    Responses API when `OPENAI_API_KEY` is set, and otherwise (or on any
//!    LLM failure) builds a deterministic heuristic summary
//!
//! The system uses:
//! - axum for the HTTP server and multipart parsing
//! - reqwest for the outbound LLM call
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use boom_summarizer::core::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Set up structured logging
//!     boom_summarizer::setup_logging()?;
//!
//!     boom_summarizer::api::serve(ServerConfig::from_env()).await?;
//!     Ok(())
//! }
//! ```
//!
//! Summaries can also be produced without the HTTP layer:
//!
//! ```
//! use boom_summarizer::core::models::SummaryType;
//! use boom_summarizer::summarize::SummaryProducer;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let producer = SummaryProducer::heuristic_only();
//! let summary = producer.produce("Kickoff\nBudget approved", SummaryType::Short).await;
//! assert_eq!(summary.model_used, "heuristic");
//! # }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod input;
pub mod prompt;
pub mod summarize;

/// JSON log layer used by [`setup_logging`], writing one object per event to
/// `writer`. Events carry their target plus the fields of the enclosing spans,
/// so every line logged while handling a request includes its `request_id`.
pub fn json_log_layer<S, W>(writer: W) -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(writer)
}

/// Configure structured logging with JSON format on stdout.
///
/// Call once at process start.
///
/// # Errors
///
/// Fails if a global subscriber has already been installed.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your binary
/// boom_summarizer::setup_logging().expect("no subscriber installed yet");
/// ```
pub fn setup_logging() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(json_log_layer(std::io::stdout))
        .try_init()
}
