//! Fixed-window admission control per source
//!
//! The limiter is a pure state transition: the caller passes in the current
//! [`RateLimitState`] for a source and gets back the decision plus the state
//! to store. It keeps no hidden counters, so it can be sharded by source key
//! and tested without a clock.
//!
//! ```text
//! now - window_start ≥ window  → allow, state = { 1, now }
//! request_count < max          → allow, request_count += 1
//! otherwise                    → deny,  state unchanged
//! ```
//!
//! Callers serialize checks per source (single writer per key) and feed
//! non-decreasing `now` values for a given key. A `now` earlier than
//! `window_start` is treated as zero elapsed time and never resets the window.
//!
//! Hosts without an external key-value store can keep states in a
//! [`SourceRateLimits`] table they own.

use std::collections::HashMap;

use chrono::Duration;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    config::RateLimitConfig,
    constants::limits::DEFAULT_TRACKED_SOURCES,
    time::{elapsed, Timestamp},
};

/// Admission counter for one source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitState {
    pub request_count: u32,
    pub window_start: Timestamp,
}

impl RateLimitState {
    /// State for a source that has not been seen yet
    pub fn fresh(now: Timestamp) -> Self {
        Self { request_count: 0, window_start: now }
    }
}

/// Outcome of one admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub new_state: RateLimitState,
}

/// Fixed-window rate limiter
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimiter {
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Decide whether one more request from this source is admitted
    pub fn check(&self, state: &RateLimitState, now: Timestamp) -> RateLimitDecision {
        if self.window_elapsed(state, now) {
            return RateLimitDecision {
                allowed: true,
                new_state: RateLimitState { request_count: 1, window_start: now },
            };
        }

        if state.request_count < self.config.max_requests {
            return RateLimitDecision {
                allowed: true,
                new_state: RateLimitState {
                    request_count: state.request_count + 1,
                    window_start: state.window_start,
                },
            };
        }

        RateLimitDecision { allowed: false, new_state: *state }
    }

    /// How long a denied source should back off before its window resets
    ///
    /// Zero when the next request would be admitted.
    pub fn retry_after(&self, state: &RateLimitState, now: Timestamp) -> Duration {
        if self.window_elapsed(state, now) || state.request_count < self.config.max_requests {
            return Duration::zero();
        }
        self.config.window() - elapsed(state.window_start, now)
    }

    fn window_elapsed(&self, state: &RateLimitState, now: Timestamp) -> bool {
        elapsed(state.window_start, now) >= self.config.window()
    }
}

/// Check one request against the default 60 requests / 60 seconds window
pub fn check_rate_limit(state: &RateLimitState, now: Timestamp) -> RateLimitDecision {
    RateLimiter::default().check(state, now)
}

/// Result of admitting a request through a [`SourceRateLimits`] table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Denied,
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Owned table of per-source states
///
/// The table grows with the number of active sources; a source it has not
/// seen is always admitted. Once it holds `prune_at` entries, inserting a new
/// source first drops sources whose window has elapsed, then moves the
/// threshold to twice the number of survivors.
#[derive(Debug)]
pub struct SourceRateLimits {
    limiter: RateLimiter,
    states: HashMap<String, RateLimitState>,
    prune_at: usize,
}

impl SourceRateLimits {
    pub fn new(limiter: RateLimiter) -> Self {
        Self {
            limiter,
            states: HashMap::new(),
            prune_at: DEFAULT_TRACKED_SOURCES,
        }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Run one admission check for `source_id` and store the new state
    pub fn admit(&mut self, source_id: &str, now: Timestamp) -> Admission {
        if let Some(state) = self.states.get_mut(source_id) {
            let decision = self.limiter.check(state, now);
            if decision.new_state.window_start != state.window_start {
                debug!("Rate limit window reset for {}", source_id);
            }
            *state = decision.new_state;
            return if decision.allowed { Admission::Allowed } else { Admission::Denied };
        }

        if self.states.len() >= self.prune_at {
            self.evict_expired(now);
            self.prune_at = (self.states.len() * 2).max(DEFAULT_TRACKED_SOURCES);
        }

        let decision = self.limiter.check(&RateLimitState::fresh(now), now);
        self.states.insert(source_id.to_string(), decision.new_state);
        Admission::Allowed
    }

    /// Current state for a source, if tracked
    pub fn state(&self, source_id: &str) -> Option<&RateLimitState> {
        self.states.get(source_id)
    }

    /// Drop sources whose window has elapsed; returns how many were dropped
    pub fn evict_expired(&mut self, now: Timestamp) -> usize {
        let window = self.limiter.config().window();
        let before = self.states.len();
        self.states.retain(|_, state| elapsed(state.window_start, now) < window);

        let evicted = before - self.states.len();
        if evicted > 0 {
            debug!("Evicted {} expired rate limit entries", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for SourceRateLimits {
    fn default() -> Self {
        Self::new(RateLimiter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const SENSOR: &str = "123e4567-e89b-12d3-a456-426614174000";
    const OTHER: &str = "9b2f5c1e-0d4a-4f6b-8c3e-7a1d2e3f4a5b";

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 20, 14, 0, 0).unwrap()
    }

    #[test]
    fn fresh_state_allows_first_request() {
        let decision = check_rate_limit(&RateLimitState::fresh(t0()), t0());
        assert!(decision.allowed);
        assert_eq!(decision.new_state.request_count, 1);
        assert_eq!(decision.new_state.window_start, t0());
    }

    #[test]
    fn sixty_first_request_denied() {
        let mut state = RateLimitState::fresh(t0());
        for n in 1..=60 {
            let decision = check_rate_limit(&state, t0() + Duration::milliseconds(n * 100));
            assert!(decision.allowed, "request {n} should be allowed");
            assert_eq!(decision.new_state.request_count, n as u32);
            state = decision.new_state;
        }

        let decision = check_rate_limit(&state, t0() + Duration::seconds(30));
        assert!(!decision.allowed);
        assert_eq!(decision.new_state, state);
    }

    #[test]
    fn window_resets_at_exactly_sixty_seconds() {
        let state = RateLimitState { request_count: 60, window_start: t0() };

        let decision = check_rate_limit(&state, t0() + Duration::milliseconds(59_999));
        assert!(!decision.allowed);

        let later = t0() + Duration::seconds(60);
        let decision = check_rate_limit(&state, later);
        assert!(decision.allowed);
        assert_eq!(decision.new_state, RateLimitState { request_count: 1, window_start: later });
    }

    #[test]
    fn clock_regression_does_not_reset() {
        let state = RateLimitState { request_count: 60, window_start: t0() };
        let decision = check_rate_limit(&state, t0() - Duration::minutes(10));
        assert!(!decision.allowed);
    }

    #[test]
    fn retry_after_reports_remaining_window() {
        let limiter = RateLimiter::default();
        let full = RateLimitState { request_count: 60, window_start: t0() };

        assert_eq!(limiter.retry_after(&full, t0() + Duration::seconds(45)), Duration::seconds(15));
        assert_eq!(limiter.retry_after(&full, t0() + Duration::seconds(60)), Duration::zero());

        let partial = RateLimitState { request_count: 3, window_start: t0() };
        assert_eq!(limiter.retry_after(&partial, t0()), Duration::zero());
    }

    #[test]
    fn custom_config() {
        let limiter = RateLimiter::new(RateLimitConfig::per_second(2).unwrap());
        let state = RateLimitState::fresh(t0());

        let d1 = limiter.check(&state, t0());
        let d2 = limiter.check(&d1.new_state, t0());
        let d3 = limiter.check(&d2.new_state, t0());
        assert!(d1.allowed && d2.allowed);
        assert!(!d3.allowed);

        let d4 = limiter.check(&d3.new_state, t0() + Duration::seconds(1));
        assert!(d4.allowed);
    }

    #[test]
    fn table_tracks_sources_independently() {
        let mut table = SourceRateLimits::new(RateLimiter::new(RateLimitConfig::per_second(1).unwrap()));

        assert_eq!(table.admit(SENSOR, t0()), Admission::Allowed);
        assert_eq!(table.admit(SENSOR, t0()), Admission::Denied);
        assert_eq!(table.admit(OTHER, t0()), Admission::Allowed);

        assert_eq!(table.state(SENSOR).map(|s| s.request_count), Some(1));
        assert_eq!(table.len(), 2);

        assert_eq!(table.admit(SENSOR, t0() + Duration::seconds(1)), Admission::Allowed);
    }

    #[test]
    fn new_sources_admitted_past_prune_threshold() {
        let mut table = SourceRateLimits::default();
        let count = DEFAULT_TRACKED_SOURCES + 50;

        for i in 0..count {
            let id = format!("00000000-0000-0000-0000-{:012}", i);
            assert!(table.admit(&id, t0()).is_allowed(), "source {i} should be admitted");
        }
        assert_eq!(table.len(), count);
    }

    #[test]
    fn pruning_drops_only_expired_sources() {
        let mut table = SourceRateLimits::default();
        for i in 0..DEFAULT_TRACKED_SOURCES - 1 {
            let id = format!("00000000-0000-0000-0000-{:012}", i);
            table.admit(&id, t0());
        }
        assert!(table.admit(SENSOR, t0() + Duration::seconds(30)).is_allowed());

        // Every early source's window is over; the next insert prunes them
        assert!(table.admit(OTHER, t0() + Duration::seconds(61)).is_allowed());
        assert_eq!(table.len(), 2);
        assert!(table.state(SENSOR).is_some());
    }

    #[test]
    fn evict_expired_counts_removed() {
        let mut table = SourceRateLimits::default();
        table.admit(SENSOR, t0());
        table.admit(OTHER, t0() + Duration::seconds(30));

        assert_eq!(table.evict_expired(t0() + Duration::seconds(60)), 1);
        assert!(table.state(SENSOR).is_none());
        assert!(!table.is_empty());
    }

    #[test]
    fn any_source_id_is_tracked() {
        let mut table = SourceRateLimits::default();
        let long = "x".repeat(100);
        assert_eq!(table.admit(&long, t0()), Admission::Allowed);
        assert_eq!(table.state(&long).map(|s| s.request_count), Some(1));
    }
}
