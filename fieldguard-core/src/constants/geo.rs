//! Geodesy Constants
//!
//! Earth model and coordinate bounds used by distance and containment checks.

/// Mean Earth radius (meters).
///
/// IUGG mean radius R1. The haversine formula assumes a spherical Earth,
/// which keeps errors under 0.5% for any pair of points.
///
/// Source: IUGG / WGS-84 derived mean radius
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Southernmost valid latitude (degrees).
pub const LAT_MIN_DEG: f64 = -90.0;

/// Northernmost valid latitude (degrees).
pub const LAT_MAX_DEG: f64 = 90.0;

/// Westernmost valid longitude (degrees).
pub const LNG_MIN_DEG: f64 = -180.0;

/// Easternmost valid longitude (degrees).
pub const LNG_MAX_DEG: f64 = 180.0;
