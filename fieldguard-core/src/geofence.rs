//! Geofence verification
//!
//! Decides whether a location claim (a field-worker check-in, a mobile
//! sensor's reported position) lies inside the area a farm structure or job
//! site has defined.
//!
//! ## Circle Fences
//!
//! ```text
//! distance ≤ radius                → Verified          (verified)
//! radius < distance ≤ radius + tol → WithinTolerance   (close, not verified)
//! otherwise                        → OutsideGeofence
//! ```
//!
//! The tolerance band absorbs GPS error on phones without letting a far-away
//! check-in pass.
//!
//! ## Polygon Fences
//!
//! Even-odd ray casting with (lng, lat) treated as planar (x, y). This is
//! only accurate for small areas: at field or site scale the distortion is
//! negligible, but fences spanning hundreds of kilometres or crossing the
//! antimeridian are not handled.
//!
//! Polygon fences have no tolerance band. A point just outside the traced
//! boundary is `OutsideGeofence`, even when the same distance would be
//! `WithinTolerance` for a circle.
//!
//! ## Malformed Input
//!
//! Invalid coordinates never raise: `verify_location_in_geofence` reports them
//! as `OutsideGeofence`. Malformed fences (fewer than three vertices, negative
//! radius) are rejected when the fence is built.

use serde::{Deserialize, Serialize};

use crate::{
    errors::GeofenceError,
    geo::{haversine_distance, validate_coordinates, Point},
    traits::GeofenceVerifier,
};

/// Outcome category of a verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    WithinTolerance,
    OutsideGeofence,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::WithinTolerance => "within_tolerance",
            Self::OutsideGeofence => "outside_geofence",
        }
    }
}

/// Result of checking one location against one fence
///
/// Produced fresh per call. Persisting it is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verified: bool,
    /// Distance from the circle center; `None` for polygon fences
    pub distance_meters: Option<f64>,
    pub within_tolerance: bool,
    pub status: VerificationStatus,
}

impl VerificationResult {
    fn verified(distance_meters: Option<f64>) -> Self {
        Self {
            verified: true,
            distance_meters,
            within_tolerance: false,
            status: VerificationStatus::Verified,
        }
    }

    fn within_tolerance(distance_meters: f64) -> Self {
        Self {
            verified: false,
            distance_meters: Some(distance_meters),
            within_tolerance: true,
            status: VerificationStatus::WithinTolerance,
        }
    }

    fn outside(distance_meters: Option<f64>) -> Self {
        Self {
            verified: false,
            distance_meters,
            within_tolerance: false,
            status: VerificationStatus::OutsideGeofence,
        }
    }
}

/// Circular fence around a center point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircleRepr")]
pub struct CircleFence {
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_meters: f64,
    pub tolerance_meters: f64,
}

#[derive(Deserialize)]
struct CircleRepr {
    center_lat: f64,
    center_lng: f64,
    radius_meters: f64,
    #[serde(default)]
    tolerance_meters: f64,
}

impl TryFrom<CircleRepr> for CircleFence {
    type Error = GeofenceError;

    fn try_from(repr: CircleRepr) -> Result<Self, Self::Error> {
        CircleFence::new(
            Point::new(repr.center_lat, repr.center_lng),
            repr.radius_meters,
            repr.tolerance_meters,
        )
    }
}

impl CircleFence {
    /// Create a circle fence, rejecting bad centers and distances
    pub fn new(center: Point, radius_meters: f64, tolerance_meters: f64) -> Result<Self, GeofenceError> {
        if !center.is_valid() {
            return Err(GeofenceError::InvalidCenter { lat: center.lat, lng: center.lng });
        }
        check_distance("radius_meters", radius_meters)?;
        check_distance("tolerance_meters", tolerance_meters)?;

        Ok(Self {
            center_lat: center.lat,
            center_lng: center.lng,
            radius_meters,
            tolerance_meters,
        })
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_lat, self.center_lng)
    }
}

fn check_distance(field: &'static str, value: f64) -> Result<(), GeofenceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeofenceError::InvalidDistance { field, value })
    }
}

/// Polygon fence, implicitly closed (last vertex connects to the first)
///
/// Self-intersection is neither assumed nor checked. No tolerance band: see
/// the module docs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonRepr", into = "PolygonRepr")]
pub struct PolygonFence {
    vertices: Vec<Point>,
}

#[derive(Serialize, Deserialize)]
struct PolygonRepr {
    vertices: Vec<Point>,
}

impl TryFrom<PolygonRepr> for PolygonFence {
    type Error = GeofenceError;

    fn try_from(repr: PolygonRepr) -> Result<Self, Self::Error> {
        PolygonFence::new(&repr.vertices)
    }
}

impl From<PolygonFence> for PolygonRepr {
    fn from(fence: PolygonFence) -> Self {
        Self { vertices: fence.vertices }
    }
}

impl PolygonFence {
    /// Create a polygon fence from at least three valid vertices
    ///
    /// There is no upper bound: traced or exported boundaries may carry
    /// hundreds of vertices.
    pub fn new(vertices: &[Point]) -> Result<Self, GeofenceError> {
        if vertices.len() < 3 {
            return Err(GeofenceError::TooFewVertices { count: vertices.len() });
        }

        if let Some((index, bad)) = vertices.iter().enumerate().find(|(_, p)| !p.is_valid()) {
            return Err(GeofenceError::InvalidVertex { index, lat: bad.lat, lng: bad.lng });
        }

        Ok(Self { vertices: vertices.to_vec() })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn contains(&self, point: &Point) -> bool {
        is_point_in_polygon(point, &self.vertices)
    }
}

/// Area a location claim is checked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geofence {
    Circle(CircleFence),
    Polygon(PolygonFence),
}

impl Geofence {
    pub fn circle(center: Point, radius_meters: f64, tolerance_meters: f64) -> Result<Self, GeofenceError> {
        CircleFence::new(center, radius_meters, tolerance_meters).map(Self::Circle)
    }

    pub fn polygon(vertices: &[Point]) -> Result<Self, GeofenceError> {
        PolygonFence::new(vertices).map(Self::Polygon)
    }

    /// Check a location claim against this fence
    pub fn verify(&self, point: &Point) -> VerificationResult {
        verify_location_in_geofence(point, self)
    }
}

/// Classify a point against a circle with a tolerance band
///
/// Does not validate coordinates; use [`verify_location_in_geofence`] for
/// untrusted input.
pub fn verify_point_in_circle(
    point: &Point,
    center: &Point,
    radius_meters: f64,
    tolerance_meters: f64,
) -> VerificationResult {
    let distance = haversine_distance(point, center);

    if distance <= radius_meters {
        VerificationResult::verified(Some(distance))
    } else if distance <= radius_meters + tolerance_meters {
        VerificationResult::within_tolerance(distance)
    } else {
        VerificationResult::outside(Some(distance))
    }
}

/// Even-odd ray casting over (lng, lat) treated as planar (x, y)
///
/// Fewer than three vertices never contain anything.
pub fn is_point_in_polygon(point: &Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let (x, y) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = vertices.len() - 1;

    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].lng, vertices[i].lat);
        let (xj, yj) = (vertices[j].lng, vertices[j].lat);

        // Edge straddles the horizontal ray; yi != yj is implied
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Verify a location claim against any fence
///
/// Invalid coordinates yield `OutsideGeofence` rather than an error.
pub fn verify_location_in_geofence(point: &Point, fence: &Geofence) -> VerificationResult {
    if !validate_coordinates(point.lat, point.lng) {
        return VerificationResult::outside(None);
    }

    match fence {
        Geofence::Circle(circle) => verify_point_in_circle(
            point,
            &circle.center(),
            circle.radius_meters,
            circle.tolerance_meters,
        ),
        Geofence::Polygon(polygon) => {
            if polygon.contains(point) {
                VerificationResult::verified(None)
            } else {
                VerificationResult::outside(None)
            }
        }
    }
}

impl GeofenceVerifier for Geofence {
    fn verify_location(&self, point: &Point) -> VerificationResult {
        verify_location_in_geofence(point, self)
    }
}

impl GeofenceVerifier for CircleFence {
    fn verify_location(&self, point: &Point) -> VerificationResult {
        if !point.is_valid() {
            return VerificationResult::outside(None);
        }
        verify_point_in_circle(point, &self.center(), self.radius_meters, self.tolerance_meters)
    }
}

impl GeofenceVerifier for PolygonFence {
    fn verify_location(&self, point: &Point) -> VerificationResult {
        if point.is_valid() && self.contains(point) {
            VerificationResult::verified(None)
        } else {
            VerificationResult::outside(None)
        }
    }
}
