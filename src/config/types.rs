// Configuration types module
// Defines all configuration-related data structures

use crate::http::cache_control::{CacheControl, CachePolicy};
use crate::http::conditional::Expiry;
use crate::http::etag::{EtagKind, EtagOptions};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path (optional, stderr if not set)
    #[serde(default)]
    pub log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: None,
        }
    }
}

/// Default freshness policy for responses
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default)]
    pub policy: CachePolicy,
    #[serde(default)]
    pub etag_kind: EtagKind,
    /// Default `Expires` horizon in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl CacheConfig {
    pub fn cache_control(&self) -> CacheControl {
        self.policy.to_cache_control()
    }

    pub fn etag_options(&self) -> EtagOptions {
        EtagOptions::from(self.etag_kind)
    }

    pub fn expiry(&self) -> Option<Expiry> {
        self.expires_in.map(Expiry::Seconds)
    }
}
