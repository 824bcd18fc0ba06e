//! Core traits for validators and geofence verifiers
//!
//! These traits define the seams hosts can plug into. Keep them simple: the
//! pipeline calls them on the hot path of a request handler.

use crate::errors::ValidationResult;
use crate::geo::Point;
use crate::geofence::VerificationResult;
use crate::time::Timestamp;

/// Context passed to validators
///
/// Carries the ingestion instant explicitly so validation never reads a clock.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    /// Instant the reading is being ingested at
    pub now: Timestamp,
}

impl ValidationContext {
    pub fn at(now: Timestamp) -> Self {
        Self { now }
    }
}

/// Core validator trait - implement this for each kind of submission
pub trait Validator {
    /// The type of value this validator handles
    type Value: ?Sized;

    /// Validate a single submission
    fn validate(&self, value: &Self::Value, context: &ValidationContext) -> ValidationResult<()>;
}

/// Anything a location claim can be checked against
pub trait GeofenceVerifier {
    /// Classify a location; malformed points are reported as outside
    fn verify_location(&self, point: &Point) -> VerificationResult;
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is numerically usable (not NaN, infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for Point {
    fn is_valid(&self) -> bool {
        Point::is_valid(self)
    }
}
