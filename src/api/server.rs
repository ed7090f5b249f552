//! API server setup and configuration.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::{
    handler::{health_handler, summarize_handler},
    types::{ApiState, ConfigSource},
};
use crate::core::config::{AppConfig, ServerConfig};

/// Router that reads [`AppConfig`] from the environment on every request.
pub fn create_router() -> Router {
    create_router_with_options(ConfigSource::Env, &ServerConfig::default())
}

/// Router bound to a fixed [`AppConfig`], e.g. for embedding or tests.
pub fn create_router_with_config(config: AppConfig) -> Router {
    create_router_with_options(
        ConfigSource::Fixed(Arc::new(config)),
        &ServerConfig::default(),
    )
}

/// Router with an explicit config source and transport limits.
///
/// The body cap is enforced by [`DefaultBodyLimit`] while the form is read,
/// so oversize bodies answer 413 with a JSON `detail` whether or not they
/// carry a `Content-Length`.
pub fn create_router_with_options(source: ConfigSource, server: &ServerConfig) -> Router {
    let state = ApiState::new(source);

    Router::new()
        .route("/health", get(health_handler))
        .route("/summarize", post(summarize_handler))
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(cors_layer(&server.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<_> = origins
        .iter()
        .filter_map(|s| s.parse::<axum::http::HeaderValue>().ok())
        .collect();

    if parsed.is_empty() {
        if !origins.is_empty() {
            warn!("SUMMARIZER_CORS_ORIGINS set but no origin parsed; allowing all origins");
        }
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS configured with {} explicit allowed origin(s)", parsed.len());
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Bind and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(server: ServerConfig) -> std::io::Result<()> {
    let addr = server.socket_addr();
    let router = create_router_with_options(ConfigSource::Env, &server);

    let listener = TcpListener::bind(addr).await?;
    let llm_enabled = AppConfig::from_env().llm_enabled();
    info!(%addr, llm_enabled, max_body_bytes = server.max_body_bytes, "Summarizer API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
