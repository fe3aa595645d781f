//! Request validation utilities.
//!
//! Provider clients call these before building any upstream request so that
//! bad input fails fast with `INVALID_INPUT` and no network traffic.

use crate::types::{Error, GeoPoint, Result};

pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LON_RANGE: (f64, f64) = (-180.0, 180.0);

/// Validate that a string has non-whitespace content.
pub fn validate_non_blank(s: &str, field: &str) -> Result<()> {
    if s.trim().is_empty() {
        return Err(Error::invalid_input(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Validate that a number is finite and within `[min, max]`.
pub fn validate_range(value: f64, min: f64, max: f64, field: &str) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(Error::invalid_input(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

pub fn validate_latitude(lat: f64, field: &str) -> Result<()> {
    validate_range(lat, LAT_RANGE.0, LAT_RANGE.1, field)
}

pub fn validate_longitude(lon: f64, field: &str) -> Result<()> {
    validate_range(lon, LON_RANGE.0, LON_RANGE.1, field)
}

/// Validate both coordinates of a point.
pub fn validate_point(point: &GeoPoint, field: &str) -> Result<()> {
    validate_latitude(point.lat, &format!("{}.lat", field))?;
    validate_longitude(point.lon, &format!("{}.lon", field))
}

/// Validate a point list's length and every member.
pub fn validate_points(points: &[GeoPoint], min: usize, max: usize, field: &str) -> Result<()> {
    if points.len() < min {
        return Err(Error::invalid_input(format!(
            "{} needs at least {} points, got {}",
            field,
            min,
            points.len()
        )));
    }
    if points.len() > max {
        return Err(Error::invalid_input(format!(
            "{} accepts at most {} points, got {}",
            field,
            max,
            points.len()
        )));
    }
    for (i, point) in points.iter().enumerate() {
        validate_point(point, &format!("{}[{}]", field, i))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_non_blank() {
        assert!(validate_non_blank("Paris", "query").is_ok());
        assert!(validate_non_blank("", "query").is_err());
        let err = validate_non_blank(" \t\n", "query").unwrap_err();
        assert_eq!(err.to_string(), "invalid input: query cannot be empty");
    }

    #[test]
    fn test_coordinate_bounds_inclusive() {
        assert!(validate_latitude(90.0, "lat").is_ok());
        assert!(validate_latitude(-90.0, "lat").is_ok());
        assert!(validate_longitude(180.0, "lon").is_ok());
        assert!(validate_longitude(-180.0, "lon").is_ok());
        assert!(validate_latitude(90.0001, "lat").is_err());
        assert!(validate_longitude(f64::NAN, "lon").is_err());
    }

    #[test]
    fn test_points_length_and_members() {
        let ok = [GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)];
        assert!(validate_points(&ok, 2, 10, "waypoints").is_ok());

        let err = validate_points(&ok[..1], 2, 10, "waypoints").unwrap_err();
        assert!(err.to_string().contains("at least 2 points"));

        let bad = [GeoPoint::new(1.0, 2.0), GeoPoint::new(95.0, 4.0)];
        let err = validate_points(&bad, 2, 10, "waypoints").unwrap_err();
        assert!(err.to_string().contains("waypoints[1].lat"));
    }

    proptest! {
        #[test]
        fn prop_valid_coordinates_accepted(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert!(validate_point(&GeoPoint::new(lat, lon), "p").is_ok());
        }

        #[test]
        fn prop_out_of_range_latitude_rejected(lat in 90.0f64..1.0e6, sign in prop::bool::ANY) {
            let lat = if sign { lat + 1e-9 } else { -lat - 1e-9 };
            prop_assert!(validate_latitude(lat, "lat").is_err());
        }
    }
}
