//! Error Types for Ingestion, Geofence Construction and Configuration
//!
//! ## Design Philosophy
//!
//! Nothing in the pipeline is fatal. Errors here describe why a piece of
//! input was turned away, so the caller can decide whether to log it, drop
//! it, or report back to the submitting device:
//!
//! 1. **Small**: variants carry only the numbers needed to explain the
//!    rejection.
//! 2. **Stable categories**: every ingestion rejection maps to a fixed
//!    snake_case category string (`invalid_value`, `future_timestamp`, ...)
//!    that hosts can return on the wire.
//! 3. **Values, not errors**: rate-limit denial, an unverified location and an
//!    empty aggregation are ordinary outcomes and are NOT modeled here.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use fieldguard_core::{IngestionError, Reading, validate_ingestion};
//!
//! let now = Utc::now();
//! let reading = Reading::new(
//!     "123e4567-e89b-12d3-a456-426614174000",
//!     27.4,
//!     now - Duration::minutes(5),
//! );
//!
//! match validate_ingestion(&reading, now) {
//!     Ok(()) => {
//!         // persist(reading);
//!     }
//!     Err(IngestionError::StaleReading { .. }) => {
//!         // device backlog too old - drop and tell the device
//!     }
//!     Err(e) => {
//!         // reply with e.category()
//!         let _ = e.category();
//!     }
//! }
//! ```

use thiserror::Error;

/// Result type for ingestion validation
pub type ValidationResult<T> = Result<T, IngestionError>;

/// Why a reading was rejected at ingestion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestionError {
    /// Value makes no numeric sense (NaN, infinity)
    #[error("Invalid value: {value} is not a finite number")]
    InvalidValue {
        /// The rejected value
        value: f64,
    },

    /// Reading claims to have been taken after the ingestion instant
    #[error("Reading timestamp is {ahead_ms}ms in the future")]
    FutureTimestamp {
        /// How far ahead of `now` the reading is
        ahead_ms: i64,
    },

    /// Reading is older than the freshness window
    #[error("Reading is {age_secs}s old, limit is {max_age_secs}s")]
    StaleReading {
        /// Age of the reading at ingestion
        age_secs: i64,
        /// Configured freshness window
        max_age_secs: i64,
    },

    /// Source identifier is not a canonical hyphenated UUID
    #[error("Invalid source id: expected 8-4-4-4-12 hex UUID")]
    InvalidSourceId,

    /// Location claim attached to the reading is outside lat/lng bounds
    #[error("Invalid location: ({lat}, {lng}) outside coordinate bounds")]
    InvalidLocation {
        /// Claimed latitude
        lat: f64,
        /// Claimed longitude
        lng: f64,
    },
}

impl IngestionError {
    /// Stable wire category for this rejection
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidValue { .. } => "invalid_value",
            Self::FutureTimestamp { .. } => "future_timestamp",
            Self::StaleReading { .. } => "stale_reading",
            Self::InvalidSourceId => "invalid_source_id",
            Self::InvalidLocation { .. } => "invalid_location",
        }
    }
}

/// Geofence construction errors
///
/// Malformed fences are rejected when they are built, so verification itself
/// never has to deal with them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeofenceError {
    /// Polygon needs at least three vertices to enclose an area
    #[error("Polygon needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied
        count: usize,
    },

    /// A polygon vertex is outside coordinate bounds
    #[error("Vertex {index} at ({lat}, {lng}) is outside coordinate bounds")]
    InvalidVertex {
        /// Position of the offending vertex
        index: usize,
        /// Vertex latitude
        lat: f64,
        /// Vertex longitude
        lng: f64,
    },

    /// Circle center is outside coordinate bounds
    #[error("Circle center ({lat}, {lng}) is outside coordinate bounds")]
    InvalidCenter {
        /// Center latitude
        lat: f64,
        /// Center longitude
        lng: f64,
    },

    /// Radius or tolerance is negative or not finite
    #[error("{field} must be a finite non-negative distance, got {value}")]
    InvalidDistance {
        /// Which distance was rejected
        field: &'static str,
        /// The rejected value
        value: f64,
    },
}

/// Unknown rollup granularity name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown granularity '{0}', expected 'hourly' or 'daily'")]
pub struct ParseGranularityError(pub String);

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for the expected shape
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config parsed but a value is unusable
    #[error("Invalid config: {reason}")]
    Invalid {
        /// What is wrong
        reason: &'static str,
    },
}
