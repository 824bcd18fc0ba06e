//! Time management for the ingestion pipeline
//!
//! Core functions never read a clock: validation and admission checks take
//! `now` as an argument. The `TimeSource` abstraction is only used by the
//! pipeline facade, so hosts can inject:
//! - System clock (production)
//! - Fixed, manually advanced time (tests and replay)

use chrono::{DateTime, Duration, Utc};

/// Wall-clock instant used throughout the pipeline
pub type Timestamp = DateTime<Utc>;

/// Source of time for the pipeline
pub trait TimeSource {
    /// Get the current instant
    fn now(&self) -> Timestamp;

    /// Check if this source follows the wall clock (vs a test clock)
    fn is_wall_clock(&self) -> bool;
}

/// System time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Fixed time source for testing and replaying backlogs
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timestamp += delta;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn is_wall_clock(&self) -> bool {
        (**self).is_wall_clock()
    }
}

/// Elapsed time from `earlier` to `later`, clamped at zero
pub fn elapsed(earlier: Timestamp, later: Timestamp) -> Duration {
    let delta = later - earlier;
    if delta < Duration::zero() {
        Duration::zero()
    } else {
        delta
    }
}
