// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Placeholder tracking id shipped in templates. Treated as "not configured".
pub const ANALYTICS_PLACEHOLDER_ID: &str = "GA_MEASUREMENT_ID_PLACEHOLDER";

/// Deployment environment. Controls crawler access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteEnv {
    Dev,
    Prod,
}

impl FromStr for SiteEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dev" => Ok(SiteEnv::Dev),
            "prod" => Ok(SiteEnv::Prod),
            other => Err(ConfigError::Invalid("SITE_ENV", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the workout archive API
    pub api_base_url: String,
    /// Analytics tracking id, if analytics is configured at all
    pub google_analytics_id: Option<String>,
    /// Public site origin used for canonical and sitemap URLs
    pub site_url: String,
    pub site_env: SiteEnv,
    /// Server port
    pub port: u16,
    /// Outbound request timeout. `None` keeps the transport default.
    pub api_timeout: Option<Duration>,
}

impl Config {
    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            api_base_url: "http://localhost:9000".to_string(),
            google_analytics_id: Some("G-TEST123".to_string()),
            site_url: "https://f3rva.org".to_string(),
            site_env: SiteEnv::Dev,
            port: 8080,
            api_timeout: None,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_timeout = match env::var("API_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("API_TIMEOUT_SECS", raw.clone()))?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw.clone()))?,
            Err(_) => 8080,
        };

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),
            google_analytics_id: normalize_tracking_id(env::var("GOOGLE_ANALYTICS_ID").ok()),
            site_url: env::var("SITE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://f3rva.org".to_string()),
            site_env: match env::var("SITE_ENV") {
                Ok(raw) => raw.parse()?,
                Err(_) => SiteEnv::Dev,
            },
            port,
            api_timeout,
        })
    }
}

/// Empty and placeholder ids mean analytics is off.
pub fn normalize_tracking_id(raw: Option<String>) -> Option<String> {
    let id = raw?.trim().to_string();
    if id.is_empty() || id == ANALYTICS_PLACEHOLDER_ID {
        None
    } else {
        Some(id)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
