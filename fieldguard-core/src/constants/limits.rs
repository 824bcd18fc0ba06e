//! Ingestion and Admission Limits
//!
//! Defaults for the freshness window, the fixed-window rate limiter and the
//! in-memory per-source table.

use super::time::{SECONDS_PER_DAY, SECONDS_PER_MINUTE};

// ===== FRESHNESS =====

/// Maximum age of a reading at ingestion time (seconds).
///
/// Devices buffer readings while offline; a day covers an overnight outage
/// without letting week-old backlogs distort current rollups.
pub const MAX_READING_AGE_SECS: i64 = SECONDS_PER_DAY;

// ===== RATE LIMITING =====

/// Fixed rate-limit window length (seconds).
pub const RATE_LIMIT_WINDOW_SECS: i64 = SECONDS_PER_MINUTE;

/// Maximum admissions per source within one window.
///
/// One reading per second on average. Sensors sampling faster should batch.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 60;

// ===== TABLE SIZING =====

/// Source count at which an in-memory rate-limit table first prunes
/// expired entries.
///
/// Not a cap: the table keeps growing while sources are active.
pub const DEFAULT_TRACKED_SOURCES: usize = 256;

/// Length of a canonical hyphenated UUID string (8-4-4-4-12).
pub const SOURCE_ID_LEN: usize = 36;
