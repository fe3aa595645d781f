//! Unit conversion and distance helpers.
//!
//! Conversions are exact divisions; rounding happens only when a value is
//! formatted for a human-readable message.

const METERS_PER_KM: f64 = 1000.0;
const SECONDS_PER_MINUTE: f64 = 60.0;
const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KM
}

pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / SECONDS_PER_MINUTE
}

/// Great-circle distance in meters (haversine).
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Degree offsets `(d_lat, d_lon)` covering `radius_m` around `lat`.
pub fn degree_span(lat: f64, radius_m: f64) -> (f64, f64) {
    const METERS_PER_DEGREE: f64 = 111_320.0;
    let d_lat = radius_m / METERS_PER_DEGREE;
    // Near the poles a longitude degree collapses; cover the whole band.
    let cos_lat = lat.to_radians().cos();
    let d_lon = if cos_lat < 1e-6 {
        180.0
    } else {
        (radius_m / (METERS_PER_DEGREE * cos_lat)).min(180.0)
    };
    (d_lat, d_lon)
}
