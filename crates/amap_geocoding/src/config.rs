//! Amap service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Amap reverse-geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmapConfig {
    /// Amap Web API key
    #[serde(default)]
    pub key: String,

    /// Base URL for the Amap REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Refill interval of the outbound token bucket in milliseconds
    /// (0 disables throttling)
    #[serde(default = "default_rate_limit_interval_ms")]
    pub rate_limit_interval_ms: u64,
}

fn default_base_url() -> String {
    "https://restapi.amap.com/v3".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_rate_limit_interval_ms() -> u64 {
    1000
}

impl Default for AmapConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            rate_limit_interval_ms: default_rate_limit_interval_ms(),
        }
    }
}

impl AmapConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            key: "test-key".to_string(),
            timeout_secs: 5,
            rate_limit_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Check if outbound throttling is enabled
    #[must_use]
    pub const fn throttling_enabled(&self) -> bool {
        self.rate_limit_interval_ms > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.key.is_empty() {
            return Err("key must not be empty".to_string());
        }

        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
