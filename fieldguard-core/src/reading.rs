//! Raw sensor readings as submitted by devices and field workers

use serde::{Deserialize, Serialize};

use crate::{geo::Point, time::Timestamp};

/// One measurement from one source
///
/// Created by the sensor at the moment of measurement and submitted once.
/// Storage keys it by `(sensor_id, recorded_at)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Source identifier, a hyphenated UUID once validated
    pub sensor_id: String,
    pub value: f64,
    pub recorded_at: Timestamp,
    /// Where the reading was taken, for check-ins and mobile sensors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
}

impl Reading {
    pub fn new(sensor_id: impl Into<String>, value: f64, recorded_at: Timestamp) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            value,
            recorded_at,
            location: None,
        }
    }

    /// Attach a location claim
    pub fn with_location(mut self, location: Point) -> Self {
        self.location = Some(location);
        self
    }
}
