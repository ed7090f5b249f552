//! HTTP API: `GET /health` and `POST /summarize`.
//!
//! ```bash
//! curl -F "text=$(cat notes.md)" -F summary_type=short http://localhost:8000/summarize
//! curl -F "file=@minutes.txt" http://localhost:8000/summarize
//! curl --data-urlencode "text=Line1" http://localhost:8000/summarize
//! ```

pub mod handler;
pub mod server;
pub mod types;

pub use server::{create_router, create_router_with_config, create_router_with_options, serve};
pub use types::{ApiState, ConfigSource, HealthResponse};
