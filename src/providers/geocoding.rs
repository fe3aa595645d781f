//! Geocoding client for Nominatim-compatible services.
//!
//! Forward geocoding, reverse geocoding, and point-of-interest search. Each
//! operation validates its input, issues exactly one GET, and normalizes the
//! upstream JSON. An empty result set is a success, not an error.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::http::UpstreamClient;
use super::units::{degree_span, haversine_meters};
use super::{GeocodingBackend, ProviderResult};
use crate::types::{Config, Error, GeoPoint, Result};
use crate::validation::{validate_non_blank, validate_point, validate_range};

pub const DEFAULT_FORWARD_LIMIT: u32 = 5;
pub const MAX_FORWARD_LIMIT: u32 = 40;
pub const DEFAULT_POI_RADIUS_M: f64 = 1000.0;
pub const MAX_POI_RADIUS_M: f64 = 50_000.0;
pub const DEFAULT_POI_LIMIT: u32 = 10;
pub const MAX_POI_LIMIT: u32 = 50;

// =============================================================================
// Requests
// =============================================================================

/// Arguments for `forward_geocode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardGeocodeRequest {
    pub query: String,
    #[serde(default = "default_forward_limit")]
    pub limit: u32,
}

fn default_forward_limit() -> u32 {
    DEFAULT_FORWARD_LIMIT
}

impl ForwardGeocodeRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_FORWARD_LIMIT,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_non_blank(&self.query, "query")?;
        validate_range(f64::from(self.limit), 1.0, f64::from(MAX_FORWARD_LIMIT), "limit")
    }
}

/// Arguments for `poi_search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiSearchRequest {
    pub query: String,
    pub near: GeoPoint,
    #[serde(default = "default_poi_radius")]
    pub radius: f64,
    #[serde(default = "default_poi_limit")]
    pub limit: u32,
}

fn default_poi_radius() -> f64 {
    DEFAULT_POI_RADIUS_M
}

fn default_poi_limit() -> u32 {
    DEFAULT_POI_LIMIT
}

impl PoiSearchRequest {
    pub fn new(query: impl Into<String>, near: GeoPoint) -> Self {
        Self {
            query: query.into(),
            near,
            radius: DEFAULT_POI_RADIUS_M,
            limit: DEFAULT_POI_LIMIT,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_non_blank(&self.query, "query")?;
        validate_point(&self.near, "near")?;
        if !(self.radius > 0.0 && self.radius <= MAX_POI_RADIUS_M) {
            return Err(Error::invalid_input(format!(
                "radius must be greater than 0 and at most {} meters, got {}",
                MAX_POI_RADIUS_M, self.radius
            )));
        }
        validate_range(f64::from(self.limit), 1.0, f64::from(MAX_POI_LIMIT), "limit")
    }

    /// Nominatim area parameters for the search circle.
    ///
    /// A single `viewbox` cannot wrap past ±180°, so a circle crossing the
    /// antimeridian gets a clipped box that only ranks results and is not
    /// `bounded`; the great-circle filter does the cut in either case.
    fn search_area(&self) -> SearchArea {
        let (d_lat, d_lon) = degree_span(self.near.lat, self.radius);
        let min_lat = (self.near.lat - d_lat).max(-90.0);
        let max_lat = (self.near.lat + d_lat).min(90.0);
        let west = self.near.lon - d_lon;
        let east = self.near.lon + d_lon;
        SearchArea {
            viewbox: format!(
                "{},{},{},{}",
                west.max(-180.0),
                max_lat,
                east.min(180.0),
                min_lat
            ),
            bounded: west >= -180.0 && east <= 180.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SearchArea {
    /// `lon1,lat1,lon2,lat2`
    viewbox: String,
    bounded: bool,
}

// =============================================================================
// Normalized payloads
// =============================================================================

/// One forward-geocoding candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Place {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
}

/// Structured address components of a reverse-geocoding hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Reverse-geocoding result. `label` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReverseGeocode {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub address: Address,
}

/// Contact and opening details from OSM tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PoiDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
}

impl PoiDetails {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.website.is_none() && self.opening_hours.is_none()
    }
}

/// One point of interest, with its distance from the search center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Poi {
    pub name: String,
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// OSM type (`cafe`, `museum`, ...), or `POI` when upstream gives none.
    #[serde(rename = "type")]
    pub kind: String,
    pub distance_meters: f64,
    /// Omitted when no contact or hours tag is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<PoiDetails>,
}

/// POI search outcome, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PoiSearch {
    pub query: String,
    pub center: GeoPoint,
    pub search_radius_meters: f64,
    /// Matches inside the radius before truncation to `limit`.
    pub total_found: usize,
    pub results: Vec<Poi>,
}

// =============================================================================
// Upstream wire format
// =============================================================================

/// Nominatim encodes coordinates as strings in `format=json`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Text(String),
    Number(f64),
}

impl Coordinate {
    fn to_f64(&self, field: &str) -> Result<f64> {
        match self {
            Coordinate::Number(n) => Ok(*n),
            Coordinate::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| Error::parse(format!("Nominatim returned non-numeric {} '{}'", field, s))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    lat: Coordinate,
    lon: Coordinate,
    #[serde(default)]
    class: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    importance: Option<f64>,
    /// Present when requested with `extratags=1`; may be `null`.
    #[serde(default)]
    extratags: Option<BTreeMap<String, Value>>,
}

impl NominatimPlace {
    fn label(&self) -> Result<String> {
        match self.display_name.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => Ok(label.to_string()),
            _ => Err(Error::parse("Nominatim result is missing display_name")),
        }
    }

    fn into_place(self) -> Result<Place> {
        Ok(Place {
            label: self.label()?,
            lat: self.lat.to_f64("lat")?,
            lon: self.lon.to_f64("lon")?,
            category: self.class,
            kind: self.kind,
            importance: self.importance,
        })
    }

    fn into_poi(self, center: &GeoPoint) -> Result<Poi> {
        let label = self.label()?;
        let lat = self.lat.to_f64("lat")?;
        let lon = self.lon.to_f64("lon")?;
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| label.split(',').next().map(|s| s.trim().to_string()))
            .unwrap_or_else(|| "Unnamed".to_string());

        let kind = self
            .kind
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| "POI".to_string());
        let details = self.extratags.as_ref().map(poi_details).filter(|d| !d.is_empty());

        Ok(Poi {
            name,
            label,
            lat,
            lon,
            category: self.class,
            kind,
            distance_meters: haversine_meters(center.lat, center.lon, lat, lon),
            details,
        })
    }
}

fn poi_details(tags: &BTreeMap<String, Value>) -> PoiDetails {
    let pick = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| tags.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    PoiDetails {
        phone: pick(&["phone", "contact:phone"]),
        website: pick(&["website", "contact:website", "url"]),
        opening_hours: pick(&["opening_hours"]),
    }
}

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    address: BTreeMap<String, Value>,
}

fn normalize_places(raw: Vec<NominatimPlace>) -> Result<Vec<Place>> {
    raw.into_iter().map(NominatimPlace::into_place).collect()
}

fn normalize_reverse(raw: NominatimReverse, point: GeoPoint) -> Result<ReverseGeocode> {
    if let Some(err) = raw.error {
        let reason = match err {
            Value::String(s) => s,
            other => other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        };
        return Err(Error::upstream(None, format!("Nominatim could not reverse geocode {}: {}", point, reason)));
    }

    let label = raw
        .display_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::parse("Nominatim reverse response is missing display_name"))?;

    Ok(ReverseGeocode {
        label,
        lat: point.lat,
        lon: point.lon,
        address: normalize_address(&raw.address),
    })
}

fn normalize_address(raw: &BTreeMap<String, Value>) -> Address {
    let pick = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| raw.get(*k).and_then(Value::as_str))
            .map(str::to_string)
    };

    Address {
        house_number: pick(&["house_number"]),
        street: pick(&["road", "pedestrian", "footway", "street"]),
        suburb: pick(&["suburb", "neighbourhood", "quarter"]),
        city: pick(&["city", "town", "village", "hamlet", "municipality"]),
        county: pick(&["county"]),
        state: pick(&["state", "region"]),
        postcode: pick(&["postcode"]),
        country: pick(&["country"]),
        country_code: pick(&["country_code"]),
    }
}

fn normalize_pois(raw: Vec<NominatimPlace>, request: &PoiSearchRequest) -> Result<PoiSearch> {
    let mut within: Vec<Poi> = raw
        .into_iter()
        .map(|p| p.into_poi(&request.near))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .filter(|p| p.distance_meters <= request.radius)
        .collect();

    within.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    let total_found = within.len();
    within.truncate(request.limit as usize);

    Ok(PoiSearch {
        query: request.query.clone(),
        center: request.near,
        search_radius_meters: request.radius,
        total_found,
        results: within,
    })
}

// =============================================================================
// Client
// =============================================================================

/// Nominatim HTTP client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: UpstreamClient,
}

impl NominatimClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: UpstreamClient::new("Nominatim", &config.nominatim, &config.user_agent)?,
        })
    }
}

#[async_trait]
impl GeocodingBackend for NominatimClient {
    async fn forward_geocode(&self, request: &ForwardGeocodeRequest) -> ProviderResult<Vec<Place>> {
        request.validate()?;

        let query = [
            ("q", request.query.trim().to_string()),
            ("format", "json".to_string()),
            ("limit", request.limit.to_string()),
        ];
        self.http
            .get_json::<Vec<NominatimPlace>>("search", &query)
            .await?
            .try_map(normalize_places)
    }

    async fn reverse_geocode(&self, point: GeoPoint) -> ProviderResult<ReverseGeocode> {
        validate_point(&point, "point")?;

        let query = [
            ("lat", point.lat.to_string()),
            ("lon", point.lon.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
        ];
        self.http
            .get_json::<NominatimReverse>("reverse", &query)
            .await?
            .try_map(|raw| normalize_reverse(raw, point))
    }

    async fn search_poi(&self, request: &PoiSearchRequest) -> ProviderResult<PoiSearch> {
        request.validate()?;

        // Over-fetch: the viewbox is a square, results are then cut to the circle.
        let upstream_limit = (request.limit * 4).min(MAX_FORWARD_LIMIT);
        let area = request.search_area();
        let mut query = vec![
            ("q", request.query.trim().to_string()),
            ("format", "json".to_string()),
            ("limit", upstream_limit.to_string()),
            ("extratags", "1".to_string()),
            ("viewbox", area.viewbox),
        ];
        if area.bounded {
            query.push(("bounded", "1".to_string()));
        }
        self.http
            .get_json::<Vec<NominatimPlace>>("search", &query)
            .await?
            .try_map(|raw| normalize_pois(raw, request))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn places(value: Value) -> Vec<NominatimPlace> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_places_parses_string_coordinates() {
        let raw = places(json!([{
            "display_name": "New York, United States",
            "lat": "40.7127281",
            "lon": "-74.0060152",
            "class": "boundary",
            "type": "administrative",
            "importance": 0.82
        }]));

        let out = normalize_places(raw).unwrap();
        assert_eq!(
            out,
            vec![Place {
                label: "New York, United States".into(),
                lat: 40.7127281,
                lon: -74.0060152,
                category: Some("boundary".into()),
                kind: Some("administrative".into()),
                importance: Some(0.82),
            }]
        );
    }

    #[test]
    fn test_normalize_places_empty_is_ok() {
        assert!(normalize_places(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_coordinate_is_parse_error() {
        let raw = places(json!([{"display_name": "x", "lat": "north", "lon": "1"}]));
        let err = normalize_places(raw).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_place_serializes_kind_as_type() {
        let place = Place {
            label: "a".into(),
            lat: 1.0,
            lon: 2.0,
            category: None,
            kind: Some("city".into()),
            importance: None,
        };
        assert_eq!(
            serde_json::to_value(&place).unwrap(),
            json!({"label": "a", "lat": 1.0, "lon": 2.0, "type": "city"})
        );
    }

    #[test]
    fn test_normalize_reverse_address() {
        let raw: NominatimReverse = serde_json::from_value(json!({
            "display_name": "New York, NY",
            "address": {
                "house_number": "1",
                "road": "Broadway",
                "town": "Manhattan",
                "state": "New York",
                "postcode": "10004",
                "country": "United States",
                "country_code": "us",
                "ISO3166-2-lvl4": "US-NY"
            }
        }))
        .unwrap();

        let rev = normalize_reverse(raw, GeoPoint::new(40.7128, -74.006)).unwrap();
        assert_eq!(rev.label, "New York, NY");
        assert_eq!(rev.address.street.as_deref(), Some("Broadway"));
        assert_eq!(rev.address.city.as_deref(), Some("Manhattan"));
        assert_eq!(rev.address.country_code.as_deref(), Some("us"));
    }

    #[test]
    fn test_normalize_reverse_upstream_error_body() {
        let raw: NominatimReverse = serde_json::from_value(json!({"error": "Unable to geocode"})).unwrap();
        let err = normalize_reverse(raw, GeoPoint::new(0.0, -140.0)).unwrap_err();
        assert!(matches!(err, Error::Upstream { status: None, .. }));
        assert!(err.to_string().contains("Unable to geocode"));
    }

    #[test]
    fn test_normalize_reverse_missing_label_is_parse_error() {
        let raw: NominatimReverse = serde_json::from_value(json!({"display_name": "  "})).unwrap();
        let err = normalize_reverse(raw, GeoPoint::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_normalize_pois_filters_sorts_truncates() {
        let mut request = PoiSearchRequest::new("cafe", GeoPoint::new(40.7580, -73.9855));
        request.radius = 1500.0;
        request.limit = 2;

        let raw = places(json!([
            {"display_name": "Far Cafe, NYC", "lat": "40.7000", "lon": "-73.9855", "class": "amenity", "type": "cafe"},
            {"display_name": "Mid Cafe, NYC", "lat": "40.7527", "lon": "-73.9772", "class": "amenity", "type": "cafe"},
            {"display_name": "Near Cafe, NYC", "name": "Near", "lat": "40.7585", "lon": "-73.9850", "class": "amenity", "type": "cafe"},
            {"display_name": "Other Cafe, NYC", "lat": "40.7600", "lon": "-73.9800", "class": "amenity", "type": "cafe"}
        ]));

        let out = normalize_pois(raw, &request).unwrap();
        assert_eq!(out.total_found, 3);
        assert_eq!(out.results.len(), 2);
        assert_eq!(out.results[0].name, "Near");
        assert!(out.results[0].distance_meters <= out.results[1].distance_meters);
        assert_eq!(out.results[1].name, "Other Cafe");
    }

    #[test]
    fn test_request_validation() {
        assert!(ForwardGeocodeRequest::new("   ").validate().is_err());
        let mut req = ForwardGeocodeRequest::new("Paris");
        assert!(req.validate().is_ok());
        req.limit = 0;
        assert!(req.validate().is_err());

        let mut poi = PoiSearchRequest::new("museum", GeoPoint::new(48.85, 2.35));
        assert!(poi.validate().is_ok());
        poi.radius = 0.0;
        assert!(poi.validate().is_err());
        poi.radius = 100.0;
        poi.near = GeoPoint::new(91.0, 0.0);
        assert!(poi.validate().is_err());
    }

    #[test]
    fn test_viewbox_encloses_center() {
        let req = PoiSearchRequest::new("museum", GeoPoint::new(0.0, 0.0));
        let area = req.search_area();
        let parts: Vec<f64> = area.viewbox.split(',').map(|p| p.parse().unwrap()).collect();
        assert!(parts[0] < 0.0 && parts[2] > 0.0);
        assert!(parts[1] > 0.0 && parts[3] < 0.0);
        assert!(area.bounded);
    }

    #[test]
    fn test_search_area_across_antimeridian_is_unbounded() {
        let mut req = PoiSearchRequest::new("cafe", GeoPoint::new(-16.5, 179.99));
        req.radius = 5000.0;
        let area = req.search_area();
        assert!(!area.bounded);
        let parts: Vec<f64> = area.viewbox.split(',').map(|p| p.parse().unwrap()).collect();
        assert_eq!(parts[2], 180.0);

        let mut west = PoiSearchRequest::new("cafe", GeoPoint::new(-16.5, -179.99));
        west.radius = 5000.0;
        assert!(!west.search_area().bounded);
    }

    #[test]
    fn test_normalize_pois_keeps_results_across_antimeridian() {
        let mut request = PoiSearchRequest::new("cafe", GeoPoint::new(-16.5, 179.99));
        request.radius = 5000.0;
        let raw = places(json!([
            {"display_name": "Dateline Cafe", "lat": "-16.5", "lon": "-179.99", "class": "amenity", "type": "cafe"}
        ]));

        let out = normalize_pois(raw, &request).unwrap();
        assert_eq!(out.total_found, 1);
        assert!(out.results[0].distance_meters < 2500.0);
    }

    #[test]
    fn test_normalize_pois_details_and_type_fallback() {
        let request = PoiSearchRequest::new("museum", GeoPoint::new(48.8606, 2.3376));
        let raw = places(json!([
            {
                "display_name": "Louvre, Paris", "name": "Louvre",
                "lat": "48.8606", "lon": "2.3376", "class": "tourism", "type": "museum",
                "extratags": {"website": "https://www.louvre.fr", "opening_hours": "Mo,Th,Sa,Su 09:00-18:00", "wikidata": "Q19675"}
            },
            {
                "display_name": "Kiosk, Paris",
                "lat": "48.8607", "lon": "2.3377",
                "extratags": {"wikidata": "Q1"}
            },
            {
                "display_name": "Corner Shop, Paris",
                "lat": "48.8608", "lon": "2.3378", "type": "",
                "extratags": null
            }
        ]));

        let out = normalize_pois(raw, &request).unwrap();
        let louvre = &out.results[0];
        assert_eq!(louvre.kind, "museum");
        assert_eq!(
            louvre.details,
            Some(PoiDetails {
                phone: None,
                website: Some("https://www.louvre.fr".into()),
                opening_hours: Some("Mo,Th,Sa,Su 09:00-18:00".into()),
            })
        );
        assert_eq!(out.results[1].kind, "POI");
        assert_eq!(out.results[1].details, None);
        assert_eq!(out.results[2].kind, "POI");

        let value = serde_json::to_value(&out.results[1]).unwrap();
        assert!(value.get("details").is_none());
        assert_eq!(value["type"], "POI");
    }
}
