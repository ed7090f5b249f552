use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::warn;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Per-request configuration for the summary producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_org_id: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_org_id: non_empty("OPENAI_ORG_ID"),
            openai_model: non_empty("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: non_empty("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
        }
    }

    /// The credential, if it is set to something other than whitespace.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    #[must_use]
    pub fn llm_enabled(&self) -> bool {
        self.api_key().is_some()
    }
}

/// Bind address and transport limits for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_bytes: usize,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparsable values are logged and replaced by their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_or(&lookup, "SUMMARIZER_HOST", defaults.host);
        let port = parse_or(&lookup, "SUMMARIZER_PORT", defaults.port);
        let max_body_bytes = match parse_or(&lookup, "SUMMARIZER_MAX_BODY_BYTES", 0usize) {
            0 => defaults.max_body_bytes,
            n => n,
        };
        let cors_origins = lookup("SUMMARIZER_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host,
            port,
            max_body_bytes,
            cors_origins,
        }
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    raw.parse().unwrap_or_else(|_| {
        warn!(key, value = raw, "Ignoring unparsable environment value");
        default
    })
}
