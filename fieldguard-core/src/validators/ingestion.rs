//! Ingestion gate for raw readings
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. `value` is finite                      → `invalid_value`
//! 2. `recorded_at` is not after `now`       → `future_timestamp`
//! 3. `now - recorded_at` ≤ freshness window → `stale_reading`
//! 4. `sensor_id` is a canonical UUID        → `invalid_source_id`
//! 5. attached location (if any) is in range → `invalid_location`
//!
//! Every check is pure and total. `now` always comes from the caller.

use serde::Serialize;

use crate::{
    config::IngestionConfig,
    errors::ValidationResult,
    reading::Reading,
    time::Timestamp,
    traits::{ValidationContext, Validator},
};

use super::utils;

/// Per-reading validator with a configurable freshness window
#[derive(Debug, Clone, Default)]
pub struct IngestionValidator {
    config: IngestionConfig,
}

impl IngestionValidator {
    pub fn new(config: IngestionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestionConfig {
        &self.config
    }

    /// Validate a reading as of `now`
    pub fn check(&self, reading: &Reading, now: Timestamp) -> ValidationResult<()> {
        utils::check_finite(reading.value)?;
        utils::check_freshness(reading.recorded_at, now, self.config.max_reading_age())?;
        utils::check_source_id(&reading.sensor_id)?;

        if let Some(location) = &reading.location {
            utils::check_location(location)?;
        }

        Ok(())
    }
}

impl Validator for IngestionValidator {
    type Value = Reading;

    fn validate(&self, value: &Reading, context: &ValidationContext) -> ValidationResult<()> {
        self.check(value, context.now)
    }
}

/// Validate a reading with the default 24 hour freshness window
pub fn validate_ingestion(reading: &Reading, now: Timestamp) -> ValidationResult<()> {
    IngestionValidator::default().check(reading, now)
}

/// Wire form of a validation outcome: `{ "valid": bool, "error"?: category }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl From<&ValidationResult<()>> for ValidationVerdict {
    fn from(result: &ValidationResult<()>) -> Self {
        match result {
            Ok(()) => Self { valid: true, error: None },
            Err(e) => Self { valid: false, error: Some(e.category()) },
        }
    }
}
