//! Configuration module for the Lente client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST backend, including the `/api` prefix
    pub api_url: String,
    /// Pre-shared key sent with every request
    pub api_key: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("LENTE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let api_key = env::var("LENTE_API_KEY").ok().filter(|k| !k.is_empty());

        let log_level = env::var("LENTE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_url,
            api_key,
            log_level,
        }
    }

    /// Configuration pointing at an explicit backend URL, everything else default.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: None,
            log_level: "info".to_string(),
        }
    }
}
