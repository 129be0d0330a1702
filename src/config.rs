//! Application configuration loaded from environment variables.

use crate::services::enrich::EnrichPolicy;
use crate::views::notice::MAX_NOTICE_TTL_SECS;
use std::env;

/// Default upstream REST API.
pub const DEFAULT_API_URL: &str =
    "https://customer-rest-service-frontend-personaltrainer.2.rahtiapp.fi/api";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the customer/training REST API (no trailing slash)
    pub api_url: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// How training enrichment treats a customer link that fails to resolve
    pub enrich_policy: EnrichPolicy,
    /// Seconds before a notice is auto-dismissed
    pub notice_ttl_secs: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:9/api".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            enrich_policy: EnrichPolicy::BestEffort,
            notice_ttl_secs: 6,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let enrich_policy = match env::var("ENRICH_POLICY") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("ENRICH_POLICY", raw))?,
            Err(_) => EnrichPolicy::BestEffort,
        };

        let notice_ttl_secs = match env::var("NOTICE_TTL_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs <= MAX_NOTICE_TTL_SECS => secs,
                _ => return Err(ConfigError::Invalid("NOTICE_TTL_SECS", raw)),
            },
            Err(_) => 6,
        };

        Ok(Self {
            api_url: env::var("TRAINER_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            enrich_policy,
            notice_ttl_secs,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
