//! Ingestion Pipeline
//!
//! ## Overview
//!
//! Wires the per-reading gates together in the order a request handler runs
//! them:
//!
//! ```text
//! Reading → IngestionValidator → rate limit → geofence (if location) → Accepted
//!               ↓                    ↓
//!            Rejected            RateLimited
//! ```
//!
//! A rejected reading never consumes a rate-limit slot. An accepted reading
//! is handed back to the caller for persistence; the pipeline stores
//! nothing but its per-source admission counters and metrics.
//!
//! ## Time
//!
//! [`IngestionPipeline::ingest`] reads the injected [`TimeSource`];
//! [`IngestionPipeline::ingest_at`] takes the instant explicitly. For a given
//! source, successive instants must not go backwards.
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use fieldguard_core::{Geofence, IngestionPipeline, Point, Reading, PipelineConfig};
//! use fieldguard_core::time::FixedTime;
//!
//! let now = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
//! let mut pipeline = IngestionPipeline::new(PipelineConfig::default(), FixedTime::new(now))?;
//!
//! let plot = Geofence::polygon(&[
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 1.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(1.0, 0.0),
//! ])?;
//!
//! let reading = Reading::new("123e4567-e89b-12d3-a456-426614174000", 27.4, now - Duration::minutes(5))
//!     .with_location(Point::new(0.5, 0.5));
//!
//! let outcome = pipeline.ingest(&reading, Some(&plot));
//! assert!(outcome.is_accepted());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use log::{debug, warn};
use serde::Serialize;

use crate::{
    config::PipelineConfig,
    errors::{ConfigError, IngestionError},
    geofence::VerificationResult,
    rate_limit::{Admission, RateLimiter, SourceRateLimits},
    reading::Reading,
    time::{SystemClock, TimeSource, Timestamp},
    traits::GeofenceVerifier,
    validators::IngestionValidator,
};

/// What happened to one submitted reading
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// Reading passed every gate; persist it
    Accepted {
        /// Geofence check, when both a location claim and a fence were given
        verification: Option<VerificationResult>,
    },
    /// Reading failed validation
    Rejected(IngestionError),
    /// Source exceeded its admission budget; reply with a backoff signal
    RateLimited,
}

impl IngestOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Geofence result of an accepted reading, if one was computed
    pub fn verification(&self) -> Option<&VerificationResult> {
        match self {
            Self::Accepted { verification } => verification.as_ref(),
            _ => None,
        }
    }
}

/// Counters for one pipeline instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineMetrics {
    pub received: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub rate_limited: u64,
    /// Accepted readings whose location verified
    pub location_verified: u64,
    /// Accepted readings whose location did not verify (incl. tolerance band)
    pub location_unverified: u64,
}

/// Validation, admission and location check for incoming readings
#[derive(Debug)]
pub struct IngestionPipeline<T: TimeSource = SystemClock> {
    validator: IngestionValidator,
    limits: SourceRateLimits,
    time_source: T,
    metrics: PipelineMetrics,
}

impl<T: TimeSource> IngestionPipeline<T> {
    /// Build a pipeline from a config, which is validated first
    pub fn new(config: PipelineConfig, time_source: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            validator: IngestionValidator::new(config.ingestion),
            limits: SourceRateLimits::new(RateLimiter::new(config.rate_limit)),
            time_source,
            metrics: PipelineMetrics::default(),
        })
    }

    /// Run a reading through every gate as of the time source's `now`
    pub fn ingest(&mut self, reading: &Reading, fence: Option<&dyn GeofenceVerifier>) -> IngestOutcome {
        let now = self.time_source.now();
        self.ingest_at(reading, fence, now)
    }

    /// Run a reading through every gate as of `now`
    pub fn ingest_at(
        &mut self,
        reading: &Reading,
        fence: Option<&dyn GeofenceVerifier>,
        now: Timestamp,
    ) -> IngestOutcome {
        self.metrics.received += 1;

        if let Err(e) = self.validator.check(reading, now) {
            warn!("Rejected reading from '{}': {}", reading.sensor_id, e);
            self.metrics.rejected += 1;
            return IngestOutcome::Rejected(e);
        }

        match self.limits.admit(&reading.sensor_id, now) {
            Admission::Allowed => {}
            Admission::Denied => {
                debug!("Rate limited reading from {}", reading.sensor_id);
                self.metrics.rate_limited += 1;
                return IngestOutcome::RateLimited;
            }
        }

        let verification = match (reading.location, fence) {
            (Some(location), Some(fence)) => Some(fence.verify_location(&location)),
            _ => None,
        };

        match &verification {
            Some(result) if result.verified => self.metrics.location_verified += 1,
            Some(result) => {
                debug!(
                    "Location of {} not verified: {}",
                    reading.sensor_id,
                    result.status.as_str()
                );
                self.metrics.location_unverified += 1;
            }
            None => {}
        }

        self.metrics.accepted += 1;
        IngestOutcome::Accepted { verification }
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    pub fn rate_limits(&self) -> &SourceRateLimits {
        &self.limits
    }

    pub fn time_source(&self) -> &T {
        &self.time_source
    }

    pub fn time_source_mut(&mut self) -> &mut T {
        &mut self.time_source
    }
}
