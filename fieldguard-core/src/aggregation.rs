//! Period aggregation of stored readings
//!
//! A periodic job (scheduled outside this crate) hands the readings of one
//! time bucket to the aggregator and stores the summaries it returns. Each
//! summary is `{avg, min, max, count}`: no weighting, no outlier rejection.
//!
//! ## Empty Input
//!
//! An empty bucket produces `None`, never a zero-valued summary, so "no
//! data" and "all readings were 0.0" stay distinguishable.
//!
//! ## Period Boundaries
//!
//! ```text
//! granularity  period_start          period_end
//! hourly       2024-03-10 14:00:00   2024-03-10 14:59:59.999
//! daily        2024-03-10 00:00:00   2024-03-10 23:59:59.999
//! ```
//!
//! Boundaries are computed on the calendar fields of a `NaiveDateTime`: no
//! timezone conversion happens here. Callers normalize to the zone the
//! buckets are defined in first ([`rollup_in`] does it for a fixed offset).
//!
//! ## Numeric Notes
//!
//! Values are expected to be finite (the ingestion gate guarantees it).
//! NaN and infinities that reach the aggregator anyway are skipped and
//! counted, not summarized; a bucket holding only such values yields `None`.
//! The mean is `sum / n`; if the sum overflows, a running mean is used instead.
//! The result is clamped into `[min, max]` so rounding in the division can
//! never break `min ≤ avg ≤ max`.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{Duration, FixedOffset, NaiveDateTime, Offset, Timelike, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    constants::time::{PERIOD_END_OFFSET_MS, SECONDS_PER_DAY, SECONDS_PER_HOUR},
    errors::ParseGranularityError,
    reading::Reading,
};

/// Calendar bucket size for rollups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Hourly,
    Daily,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }

    /// Length of one period
    pub fn duration(&self) -> Duration {
        match self {
            Self::Hourly => Duration::seconds(SECONDS_PER_HOUR),
            Self::Daily => Duration::seconds(SECONDS_PER_DAY),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            other => Err(ParseGranularityError(other.to_string())),
        }
    }
}

/// Summary statistics over one closed set of readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub avg_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub reading_count: usize,
}

/// One stored rollup row, keyed by `(source_id, period_start, granularity)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub source_id: String,
    pub period_start: NaiveDateTime,
    pub granularity: Granularity,
    #[serde(flatten)]
    pub result: AggregationResult,
}

/// Streaming accumulator for avg/min/max/count
#[derive(Debug, Clone, Copy, Default)]
pub struct Accumulator {
    sum: f64,
    running_mean: f64,
    min: f64,
    max: f64,
    count: usize,
    skipped: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one value; non-finite values are skipped
    pub fn push(&mut self, value: f64) {
        if !value.is_finite() {
            self.skipped += 1;
            return;
        }

        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
        self.running_mean += (value - self.running_mean) / self.count as f64;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of non-finite values left out of the summary
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Summary of everything pushed so far; `None` if nothing was
    pub fn finish(&self) -> Option<AggregationResult> {
        if self.count == 0 {
            return None;
        }

        let mean = self.sum / self.count as f64;
        let mean = if mean.is_finite() { mean } else { self.running_mean };

        Some(AggregationResult {
            avg_value: mean.clamp(self.min, self.max),
            min_value: self.min,
            max_value: self.max,
            reading_count: self.count,
        })
    }
}

impl Extend<f64> for Accumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Summarize a set of readings; `None` for an empty set
pub fn aggregate_readings(readings: &[Reading]) -> Option<AggregationResult> {
    let mut acc = Accumulator::new();
    acc.extend(readings.iter().map(|r| r.value));
    if acc.skipped() > 0 {
        warn!("Skipped {} non-finite values while aggregating", acc.skipped());
    }
    acc.finish()
}

/// First instant of the hour or day containing `date`
pub fn period_start(date: NaiveDateTime, granularity: Granularity) -> NaiveDateTime {
    let hour = match granularity {
        Granularity::Hourly => date.hour(),
        Granularity::Daily => 0,
    };
    // hour comes from a valid time, so this is always Some
    date.date().and_hms_opt(hour, 0, 0).unwrap_or(date)
}

/// Last millisecond of the hour or day containing `date`
pub fn period_end(date: NaiveDateTime, granularity: Granularity) -> NaiveDateTime {
    period_start(date, granularity) + granularity.duration()
        - Duration::milliseconds(PERIOD_END_OFFSET_MS)
}

/// Bucket readings per source and UTC period, then summarize each bucket
///
/// Output is ordered by source id, then period start.
pub fn rollup(readings: &[Reading], granularity: Granularity) -> Vec<PeriodSummary> {
    rollup_in(readings, granularity, Utc.fix())
}

/// Like [`rollup`], with period boundaries taken in a fixed UTC offset
pub fn rollup_in(
    readings: &[Reading],
    granularity: Granularity,
    offset: FixedOffset,
) -> Vec<PeriodSummary> {
    let mut buckets: BTreeMap<(&str, NaiveDateTime), Accumulator> = BTreeMap::new();

    for reading in readings {
        let local = reading.recorded_at.with_timezone(&offset).naive_local();
        let key = (reading.sensor_id.as_str(), period_start(local, granularity));
        buckets.entry(key).or_default().push(reading.value);
    }

    buckets
        .into_iter()
        .filter_map(|((source_id, period_start), acc)| {
            acc.finish().map(|result| PeriodSummary {
                source_id: source_id.to_string(),
                period_start,
                granularity,
                result,
            })
        })
        .collect()
}
