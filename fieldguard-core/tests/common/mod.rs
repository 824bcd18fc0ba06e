//! Common fixtures for integration tests
//!
//! - Fixed instants and source ids
//! - Plot and site geofences used across scenarios
//! - A deterministic reading generator

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};

use fieldguard_core::{time::Timestamp, Geofence, Point, Reading};

pub mod generators;

pub const SENSOR_A: &str = "123e4567-e89b-12d3-a456-426614174000";
pub const SENSOR_B: &str = "9b2f5c1e-0d4a-4f6b-8c3e-7a1d2e3f4a5b";
pub const WORKER: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d479";

/// Ingestion instant used by most scenarios
pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
}

/// Unit square plot with corners at (0,0) and (1,1)
pub fn unit_square() -> Geofence {
    Geofence::polygon(&[
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, 0.0),
    ])
    .unwrap()
}

/// Field site in Nairobi, 250m radius with a 50m tolerance band
pub fn nairobi_site() -> Geofence {
    Geofence::circle(Point::new(-1.2921, 36.8219), 250.0, 50.0).unwrap()
}

/// Reading taken `minutes_ago` before [`now`]
pub fn reading(sensor_id: &str, value: f64, minutes_ago: i64) -> Reading {
    Reading::new(sensor_id, value, now() - Duration::minutes(minutes_ago))
}
