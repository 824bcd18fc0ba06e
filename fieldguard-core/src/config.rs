//! Pipeline configuration
//!
//! Defaults come from [`crate::constants`]. Hosts that need different limits
//! either build the structs directly or load them from JSON:
//!
//! ```json
//! {
//!   "ingestion": { "max_reading_age_secs": 43200 },
//!   "rate_limit": { "window_secs": 60, "max_requests": 120 }
//! }
//! ```
//!
//! Missing sections and fields fall back to their defaults.

use std::{fs, path::Path};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{
    constants::limits::{MAX_READING_AGE_SECS, RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS},
    errors::ConfigError,
};

/// Reading acceptance limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Freshness window: readings older than this are stale
    pub max_reading_age_secs: i64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self { max_reading_age_secs: MAX_READING_AGE_SECS }
    }
}

impl IngestionConfig {
    /// Freshness window; saturates when the seconds exceed `Duration`'s range
    pub fn max_reading_age(&self) -> Duration {
        Duration::try_seconds(self.max_reading_age_secs).unwrap_or(Duration::MAX)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_reading_age_secs <= 0 {
            return Err(ConfigError::Invalid { reason: "max_reading_age_secs must be positive" });
        }
        if Duration::try_seconds(self.max_reading_age_secs).is_none() {
            return Err(ConfigError::Invalid { reason: "max_reading_age_secs is out of range" });
        }
        Ok(())
    }
}

/// Fixed-window admission limits, per source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub window_secs: i64,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: RATE_LIMIT_WINDOW_SECS,
            max_requests: RATE_LIMIT_MAX_REQUESTS,
        }
    }
}

impl RateLimitConfig {
    /// Create a config, rejecting empty windows and zero budgets
    pub fn new(window_secs: i64, max_requests: u32) -> Result<Self, ConfigError> {
        let config = Self { window_secs, max_requests };
        config.validate()?;
        Ok(config)
    }

    /// One-second windows for high-frequency sensors
    pub fn per_second(max_requests: u32) -> Result<Self, ConfigError> {
        Self::new(1, max_requests)
    }

    /// Window length; saturates when the seconds exceed `Duration`'s range
    pub fn window(&self) -> Duration {
        Duration::try_seconds(self.window_secs).unwrap_or(Duration::MAX)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_secs <= 0 {
            return Err(ConfigError::Invalid { reason: "window_secs must be positive" });
        }
        if Duration::try_seconds(self.window_secs).is_none() {
            return Err(ConfigError::Invalid { reason: "window_secs is out of range" });
        }
        if self.max_requests == 0 {
            return Err(ConfigError::Invalid { reason: "max_requests must be at least 1" });
        }
        Ok(())
    }
}

/// Everything the ingestion pipeline can be tuned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub ingestion: IngestionConfig,
    pub rate_limit: RateLimitConfig,
}

impl PipelineConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ingestion.validate()?;
        self.rate_limit.validate()
    }
}
