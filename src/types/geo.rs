//! Geographic point type shared by tools and provider clients.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
///
/// Serializes as `{"lat": .., "lon": ..}`. Deserialization also accepts the
/// `[lat, lon]` array form that function-calling models often produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `lon,lat` pair in the order OSRM expects.
    pub fn to_lon_lat(&self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Object { lat: f64, lon: f64 },
    Pair([f64; 2]),
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        PointRepr::deserialize(deserializer).map(GeoPoint::from)
    }
}

impl From<PointRepr> for GeoPoint {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Object { lat, lon } => GeoPoint { lat, lon },
            PointRepr::Pair([lat, lon]) => GeoPoint { lat, lon },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_both_forms() {
        let a: GeoPoint = serde_json::from_value(json!({"lat": 40.7128, "lon": -74.006})).unwrap();
        let b: GeoPoint = serde_json::from_value(json!([40.7128, -74.006])).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_lon_lat(), "-74.006,40.7128");
    }

    #[test]
    fn test_serialize_object_form() {
        let value = serde_json::to_value(GeoPoint::new(1.5, 2.5)).unwrap();
        assert_eq!(value, json!({"lat": 1.5, "lon": 2.5}));
    }
}
