//! Shared geometry: coordinates and great-circle distance
//!
//! ## Coordinate Validation
//!
//! Latitude must lie in [-90, 90] and longitude in [-180, 180], bounds
//! inclusive. NaN fails every comparison and is therefore rejected too.
//! Validation runs before any geometry; the distance calculator itself does
//! no filtering.
//!
//! ## Haversine Distance
//!
//! ```text
//! a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)
//! c = 2 · atan2(√a, √(1−a))
//! d = R · c
//! ```
//!
//! with R the mean Earth radius. `a` is clamped to [0, 1]: rounding can push
//! it a hair above 1 for near-antipodal points, which would make `√(1−a)` NaN.

use serde::{Deserialize, Serialize};

use crate::constants::geo::{
    EARTH_MEAN_RADIUS_M, LAT_MAX_DEG, LAT_MIN_DEG, LNG_MAX_DEG, LNG_MIN_DEG,
};

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    /// Build a point without checking bounds
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a point only if it passes coordinate validation
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        validate_coordinates(lat, lng).then_some(Self { lat, lng })
    }

    /// Whether this point is inside coordinate bounds
    pub fn is_valid(&self) -> bool {
        validate_coordinates(self.lat, self.lng)
    }

    /// Great-circle distance to another point in meters
    pub fn distance_to(&self, other: &Point) -> f64 {
        haversine_distance(self, other)
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Check latitude/longitude bounds (inclusive)
pub fn validate_coordinates(lat: f64, lng: f64) -> bool {
    (LAT_MIN_DEG..=LAT_MAX_DEG).contains(&lat) && (LNG_MIN_DEG..=LNG_MAX_DEG).contains(&lng)
}

/// Great-circle distance between two points in meters
pub fn haversine_distance(p1: &Point, p2: &Point) -> f64 {
    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let d_phi = (p2.lat - p1.lat).to_radians();
    let d_lambda = (p2.lng - p1.lng).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_MEAN_RADIUS_M * c
}
