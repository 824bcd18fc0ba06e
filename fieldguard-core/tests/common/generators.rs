//! Deterministic reading series for rollup and throughput scenarios

use chrono::Duration;

use fieldguard_core::{time::Timestamp, Reading};

/// Soil-moisture style series with a slow drift and bounded noise
pub struct SeriesGenerator {
    seed: u32,
    time: Timestamp,
}

impl SeriesGenerator {
    pub fn new(start: Timestamp) -> Self {
        Self {
            seed: 0x1234_5678,
            time: start,
        }
    }

    /// `count` readings spaced `interval` apart, values within `base ± spread`
    pub fn series(
        &mut self,
        sensor_id: &str,
        base: f64,
        spread: f64,
        count: usize,
        interval: Duration,
    ) -> Vec<Reading> {
        let mut readings = Vec::with_capacity(count);
        for _ in 0..count {
            let noise = (self.random_unit() * 2.0 - 1.0) * spread;
            readings.push(Reading::new(sensor_id, base + noise, self.time));
            self.time += interval;
        }
        readings
    }

    pub fn time(&self) -> Timestamp {
        self.time
    }

    fn random_unit(&mut self) -> f64 {
        // Linear congruential generator
        self.seed = self.seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        f64::from(self.seed >> 8) / 16_777_216.0
    }
}
