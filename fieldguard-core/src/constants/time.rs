//! Time-Related Constants
//!
//! Conversion factors and period lengths used by the freshness check,
//! the rate limiter and period rollups.

// ===== TIME UNIT CONVERSIONS =====

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;

/// Seconds per day.
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

// ===== PERIOD BOUNDARIES =====

/// Offset from a period's start to its last representable instant
/// (milliseconds before the next period begins).
///
/// Period ends are inclusive and millisecond precise, so an hourly period
/// starting at 10:00:00.000 ends at 10:59:59.999.
pub const PERIOD_END_OFFSET_MS: i64 = 1;
