//! Common validation utilities
//!
//! Pure, allocation-free checks shared by validators. Each returns a
//! `ValidationResult` so validators can chain them with `?` and stop at the
//! first failure.

use chrono::Duration;

use crate::{
    constants::limits::SOURCE_ID_LEN,
    errors::{IngestionError, ValidationResult},
    geo::Point,
    time::Timestamp,
    traits::Validatable,
};

/// Hyphen positions in a canonical 8-4-4-4-12 UUID
const UUID_HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Check that a value is a usable number
pub fn check_finite(value: f64) -> ValidationResult<()> {
    if value.is_valid() {
        Ok(())
    } else {
        Err(IngestionError::InvalidValue { value })
    }
}

/// Check that a timestamp is not after `now` and not older than `max_age`
///
/// A reading taken exactly `max_age` ago is still fresh.
pub fn check_freshness(recorded_at: Timestamp, now: Timestamp, max_age: Duration) -> ValidationResult<()> {
    if recorded_at > now {
        return Err(IngestionError::FutureTimestamp {
            ahead_ms: (recorded_at - now).num_milliseconds(),
        });
    }

    let age = now - recorded_at;
    if age > max_age {
        return Err(IngestionError::StaleReading {
            age_secs: age.num_seconds(),
            max_age_secs: max_age.num_seconds(),
        });
    }

    Ok(())
}

/// Check the canonical hyphenated UUID shape, case-insensitive
///
/// Only the textual shape is checked; version and variant nibbles are not.
pub fn check_source_id(source_id: &str) -> ValidationResult<()> {
    if is_canonical_uuid(source_id) {
        Ok(())
    } else {
        Err(IngestionError::InvalidSourceId)
    }
}

/// Check that an attached location claim is inside coordinate bounds
pub fn check_location(location: &Point) -> ValidationResult<()> {
    if location.is_valid() {
        Ok(())
    } else {
        Err(IngestionError::InvalidLocation { lat: location.lat, lng: location.lng })
    }
}

/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` with hex digits in either case
pub fn is_canonical_uuid(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != SOURCE_ID_LEN {
        return false;
    }

    bytes.iter().enumerate().all(|(i, b)| {
        if UUID_HYPHENS.contains(&i) {
            *b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn finite_check() {
        assert!(check_finite(27.4).is_ok());
        assert!(check_finite(-0.0).is_ok());
        assert!(matches!(check_finite(f64::NAN), Err(IngestionError::InvalidValue { .. })));
        assert!(check_finite(f64::INFINITY).is_err());
        assert!(check_finite(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn freshness_bounds() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let day = Duration::hours(24);

        assert!(check_freshness(now, now, day).is_ok());
        assert!(check_freshness(now - day, now, day).is_ok());
        assert_eq!(
            check_freshness(now + Duration::milliseconds(1), now, day),
            Err(IngestionError::FutureTimestamp { ahead_ms: 1 })
        );
        assert_eq!(
            check_freshness(now - day - Duration::seconds(1), now, day),
            Err(IngestionError::StaleReading { age_secs: 86_401, max_age_secs: 86_400 })
        );
    }

    #[test]
    fn uuid_shape() {
        assert!(is_canonical_uuid("123e4567-e89b-12d3-a456-426614174000"));
        assert!(is_canonical_uuid("123E4567-E89B-12D3-A456-426614174000"));
        assert!(is_canonical_uuid("00000000-0000-0000-0000-000000000000"));

        // Simple (unhyphenated), braced and URN forms are not canonical
        assert!(!is_canonical_uuid("123e4567e89b12d3a456426614174000"));
        assert!(!is_canonical_uuid("{123e4567-e89b-12d3-a456-426614174000}"));
        assert!(!is_canonical_uuid("urn:uuid:123e4567-e89b-12d3-a456-426614174000"));

        assert!(!is_canonical_uuid(""));
        assert!(!is_canonical_uuid("123e4567-e89b-12d3-a456-42661417400g"));
        assert!(!is_canonical_uuid("123e4567-e89b-12d3-a456_426614174000"));
        assert!(!is_canonical_uuid("123e456-7e89b-12d3-a456-426614174000"));
        // Multi-byte characters change the byte length
        assert!(!is_canonical_uuid("123e4567-e89b-12d3-a456-42661417400é"));
    }

    #[test]
    fn location_check() {
        assert!(check_location(&Point::new(45.0, 90.0)).is_ok());
        assert_eq!(
            check_location(&Point::new(45.0, 190.0)),
            Err(IngestionError::InvalidLocation { lat: 45.0, lng: 190.0 })
        );
    }
}
