//! Constants for FieldGuard Core
//!
//! Centralized, documented defaults used throughout the ingestion pipeline.
//! Every numeric value the pipeline relies on lives here, with its unit in
//! the name.
//!
//! ## Organization
//!
//! - **Geo**: Earth model and coordinate bounds
//! - **Time**: Time unit conversions and period lengths
//! - **Limits**: Freshness window, rate-limit window and table capacities
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Config structs take their `Default` from here
//! 3. Use descriptive names that include units

/// Earth model and coordinate bounds.
pub mod geo;

/// Time unit conversions and aggregation period lengths.
pub mod time;

/// Ingestion and admission limits.
pub mod limits;

pub use geo::{
    EARTH_MEAN_RADIUS_M, LAT_MIN_DEG, LAT_MAX_DEG, LNG_MIN_DEG, LNG_MAX_DEG,
};

pub use time::{
    SECONDS_PER_MINUTE, SECONDS_PER_HOUR, SECONDS_PER_DAY,
};

pub use limits::{
    MAX_READING_AGE_SECS, RATE_LIMIT_WINDOW_SECS, RATE_LIMIT_MAX_REQUESTS,
    DEFAULT_TRACKED_SOURCES,
};
