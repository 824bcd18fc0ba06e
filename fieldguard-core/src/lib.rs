//! Core ingestion engine for FieldGuard
//!
//! Accepts raw readings from IoT sensors and field-worker check-ins,
//! validates and rate-limits them, verifies location claims against a
//! geofence, and rolls stored readings into hourly or daily summaries.
//!
//! Key constraints:
//! - Pure, synchronous functions; no I/O, no internal clock reads
//! - Rejections are values, never panics
//! - Per-source rate-limit state is passed in and returned, never global
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use fieldguard_core::{
//!     check_rate_limit, validate_ingestion, Geofence, Point, RateLimitState, Reading,
//! };
//!
//! let now = Utc::now();
//! let reading = Reading::new("123e4567-e89b-12d3-a456-426614174000", 27.4, now - Duration::minutes(5));
//!
//! // Gate the reading
//! validate_ingestion(&reading, now)?;
//!
//! // Admit it against this source's stored counter
//! let decision = check_rate_limit(&RateLimitState::fresh(now), now);
//! assert!(decision.allowed);
//!
//! // Check where it was taken
//! let site = Geofence::circle(Point::new(-1.2921, 36.8219), 250.0, 50.0)?;
//! let result = site.verify(&Point::new(-1.2925, 36.8221));
//! # let _ = result;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod aggregation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod geo;
pub mod geofence;
pub mod pipeline;
pub mod rate_limit;
pub mod reading;
pub mod time;
pub mod traits;
pub mod validators;

// Public API
pub use aggregation::{
    aggregate_readings, period_end, period_start, rollup, AggregationResult, Granularity,
    PeriodSummary,
};
pub use config::{IngestionConfig, PipelineConfig, RateLimitConfig};
pub use errors::{ConfigError, GeofenceError, IngestionError, ValidationResult};
pub use geo::{haversine_distance, validate_coordinates, Point};
pub use geofence::{
    is_point_in_polygon, verify_location_in_geofence, verify_point_in_circle, CircleFence,
    Geofence, PolygonFence, VerificationResult, VerificationStatus,
};
pub use pipeline::{IngestOutcome, IngestionPipeline, PipelineMetrics};
pub use rate_limit::{check_rate_limit, RateLimitDecision, RateLimitState, RateLimiter};
pub use reading::Reading;
pub use traits::{GeofenceVerifier, ValidationContext, Validator};
pub use validators::{validate_ingestion, IngestionValidator, ValidationVerdict};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
