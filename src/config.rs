//! Catalog Configuration
//!
//! Simulated latency, page size and token signing settings. Every field
//! has a serde default, so `{}` is a complete configuration file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// HMAC secret for signing
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Issuer identifier
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Audience identifier
    #[serde(default = "default_issuer")]
    pub audience: String,

    /// Token lifetime in minutes (default: one day)
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,
}

fn default_secret() -> String {
    "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "bookwise".to_string()
}

fn default_ttl_minutes() -> i64 {
    60 * 24
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            issuer: default_issuer(),
            audience: default_issuer(),
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Artificial delay applied to every operation result (default: 500)
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Books per listing page (default: 5)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub token: TokenConfig,
}

fn default_latency_ms() -> u64 {
    500
}

fn default_page_size() -> usize {
    5
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            page_size: default_page_size(),
            token: TokenConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Default config without the artificial delay
    pub fn instant() -> Self {
        Self {
            latency_ms: 0,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: CatalogConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be > 0".to_string()));
        }

        if self.token.secret.is_empty() {
            return Err(ConfigError::Invalid("token.secret must not be empty".to_string()));
        }

        if self.token.ttl_minutes <= 0 {
            return Err(ConfigError::Invalid("token.ttl_minutes must be > 0".to_string()));
        }

        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
