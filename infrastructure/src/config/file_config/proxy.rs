//! Completion proxy configuration from TOML (`[proxy]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw proxy configuration from TOML
///
/// # Example
///
/// ```toml
/// [proxy]
/// endpoint = "http://localhost:8787/api/complete"
/// timeout_secs = 60
/// max_retries = 2
/// retry_backoff_ms = 500
/// api_key_env = "COD_PROXY_KEY"   # optional bearer token
/// max_temperature = 1.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProxyConfig {
    pub endpoint: String,
    /// Timeout for a single HTTP attempt
    pub timeout_secs: u64,
    /// Retries after 429 / 5xx answers
    pub max_retries: u32,
    /// First retry delay, doubled on every further retry
    pub retry_backoff_ms: u64,
    /// Environment variable holding a bearer token for the proxy
    pub api_key_env: Option<String>,
    /// Temperatures above this are clamped before sending
    pub max_temperature: f64,
}

impl Default for FileProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8787/api/complete".to_string(),
            timeout_secs: 60,
            max_retries: 2,
            retry_backoff_ms: 500,
            api_key_env: None,
            max_temperature: 1.0,
        }
    }
}

impl FileProxyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Worst-case wall time of one `generate` call: every attempt timing
    /// out plus every backoff delay.
    pub fn call_budget(&self) -> Duration {
        let attempts = self.max_retries.saturating_add(1);
        let backoff_total: u64 = (0..self.max_retries)
            .map(|i| self.retry_backoff_ms.saturating_mul(1u64 << i.min(20)))
            .sum();
        self.timeout() * attempts + Duration::from_millis(backoff_total)
    }

    /// Bearer token from the configured environment variable, if set and non-empty
    pub fn resolve_api_key(&self) -> Option<String> {
        let name = self.api_key_env.as_deref()?;
        std::env::var(name).ok().filter(|key| !key.trim().is_empty())
    }
}
