//! Routing client for OSRM-compatible services.
//!
//! Route between waypoints, pairwise distance/duration tables, and GPS trace
//! matching. Coordinates go on the wire as `lon,lat` pairs joined by `;`.
//! Distances stay in meters and durations in seconds; kilometer and minute
//! fields are exact conversions of the same numbers.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::http::UpstreamClient;
use super::units::{meters_to_km, seconds_to_minutes};
use super::{ProviderResult, RoutingBackend};
use crate::types::{Config, Error, GeoPoint, Result};
use crate::validation::validate_points;

pub const MAX_WAYPOINTS: usize = 25;
pub const MAX_MATRIX_POINTS: usize = 100;
pub const MAX_TRACE_POINTS: usize = 100;

/// OSRM `code` values that mean "nothing matched" rather than a fault.
const NO_RESULT_CODES: &[&str] = &["NoRoute", "NoMatch", "NoSegment", "NoTable", "NoTrips"];

// =============================================================================
// Profiles & requests
// =============================================================================

/// Travel mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Car,
    Bike,
    Foot,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Car, Profile::Bike, Profile::Foot];

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Car => "car",
            Profile::Bike => "bike",
            Profile::Foot => "foot",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments for `route`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub waypoints: Vec<GeoPoint>,
    #[serde(default)]
    pub profile: Profile,
}

impl RouteRequest {
    pub fn new(waypoints: Vec<GeoPoint>, profile: Profile) -> Self {
        Self { waypoints, profile }
    }

    pub fn validate(&self) -> Result<()> {
        validate_points(&self.waypoints, 2, MAX_WAYPOINTS, "waypoints")
    }
}

/// Arguments for `match_trace`. Points are in time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTraceRequest {
    pub points: Vec<GeoPoint>,
    /// Unix seconds, one per point, strictly increasing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Vec<i64>>,
    #[serde(default)]
    pub profile: Profile,
}

impl MatchTraceRequest {
    pub fn new(points: Vec<GeoPoint>, profile: Profile) -> Self {
        Self {
            points,
            timestamps: None,
            profile,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_points(&self.points, 2, MAX_TRACE_POINTS, "points")?;
        if let Some(ts) = &self.timestamps {
            if ts.len() != self.points.len() {
                return Err(Error::invalid_input(format!(
                    "timestamps must have one entry per point ({} points, {} timestamps)",
                    self.points.len(),
                    ts.len()
                )));
            }
            if ts.windows(2).any(|w| w[1] <= w[0]) {
                return Err(Error::invalid_input("timestamps must be strictly increasing"));
            }
        }
        Ok(())
    }
}

/// Arguments for `distance_matrix`.
///
/// `sources` and `destinations` index into `points`; when absent every point
/// is used, giving a square matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRequest {
    pub points: Vec<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<usize>>,
    #[serde(default)]
    pub profile: Profile,
}

impl MatrixRequest {
    pub fn new(points: Vec<GeoPoint>, profile: Profile) -> Self {
        Self {
            points,
            sources: None,
            destinations: None,
            profile,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_points(&self.points, 2, MAX_MATRIX_POINTS, "points")?;
        check_indices(self.sources.as_deref(), self.points.len(), "sources")?;
        check_indices(self.destinations.as_deref(), self.points.len(), "destinations")
    }

    pub fn source_indices(&self) -> Vec<usize> {
        self.sources.clone().unwrap_or_else(|| (0..self.points.len()).collect())
    }

    pub fn destination_indices(&self) -> Vec<usize> {
        self.destinations
            .clone()
            .unwrap_or_else(|| (0..self.points.len()).collect())
    }
}

fn check_indices(indices: Option<&[usize]>, len: usize, field: &str) -> Result<()> {
    let indices = match indices {
        Some(indices) => indices,
        None => return Ok(()),
    };
    if indices.is_empty() {
        return Err(Error::invalid_input(format!("{} must not be empty", field)));
    }
    if let Some(bad) = indices.iter().find(|&&i| i >= len) {
        return Err(Error::invalid_input(format!(
            "{} index {} is out of range for {} points",
            field, bad, len
        )));
    }
    Ok(())
}

fn join_indices(indices: &[usize]) -> String {
    indices.iter().map(usize::to_string).collect::<Vec<_>>().join(";")
}

fn coordinate_path(points: &[GeoPoint]) -> String {
    points
        .iter()
        .map(GeoPoint::to_lon_lat)
        .collect::<Vec<_>>()
        .join(";")
}

// =============================================================================
// Normalized payloads
// =============================================================================

/// One turn-by-turn instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteStep {
    /// OSRM maneuver type: `depart`, `turn`, `arrive`, ...
    pub maneuver: String,
    /// Direction of the maneuver (`left`, `slight right`, ...).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub modifier: Option<String>,
    /// Road the step travels along; empty for unnamed ways.
    #[serde(default)]
    pub name: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// One leg between consecutive waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteLeg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub summary: String,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

/// Best route through the requested waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteSummary {
    pub profile: Profile,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub distance_km: f64,
    pub duration_minutes: f64,
    /// GeoJSON LineString.
    pub geometry: Value,
    pub legs: Vec<RouteLeg>,
}

/// One cell of a distance matrix; `None` when the pair is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatrixCell {
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
}

/// `cells[i][j]` runs from `points[sources[i]]` to `points[destinations[j]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DistanceMatrix {
    pub profile: Profile,
    /// Number of input points.
    pub size: usize,
    pub sources: Vec<usize>,
    pub destinations: Vec<usize>,
    pub cells: Vec<Vec<MatrixCell>>,
}

/// One matched sub-trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Matching {
    pub confidence: f64,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub geometry: Value,
}

/// Trace-matching outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TraceMatch {
    pub profile: Profile,
    /// Mean confidence across matchings, in `[0, 1]`.
    pub confidence: f64,
    pub matched_points: usize,
    pub total_points: usize,
    pub matchings: Vec<Matching>,
}

// =============================================================================
// Upstream wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: Value,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
    duration: f64,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    maneuver: OsrmManeuver,
}

#[derive(Debug, Default, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    modifier: Option<String>,
}

impl From<OsrmStep> for RouteStep {
    fn from(step: OsrmStep) -> Self {
        Self {
            maneuver: step.maneuver.kind,
            modifier: step.maneuver.modifier,
            name: step.name,
            distance_meters: step.distance,
            duration_seconds: step.duration,
        }
    }
}

type OsrmTable = Vec<Vec<Option<f64>>>;

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    durations: Option<OsrmTable>,
    #[serde(default)]
    distances: Option<OsrmTable>,
}

#[derive(Debug, Deserialize)]
struct OsrmMatchResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    matchings: Vec<OsrmMatching>,
    #[serde(default)]
    tracepoints: Vec<Option<Value>>,
}

#[derive(Debug, Deserialize)]
struct OsrmMatching {
    #[serde(default)]
    confidence: f64,
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: Value,
}

fn check_code(code: &str, message: Option<&str>) -> Result<()> {
    if code == "Ok" {
        return Ok(());
    }
    let detail = message.unwrap_or("no details");
    if NO_RESULT_CODES.contains(&code) {
        Err(Error::not_found(format!("OSRM found no result ({}): {}", code, detail)))
    } else {
        Err(Error::upstream(None, format!("OSRM returned {}: {}", code, detail)))
    }
}

fn normalize_route(raw: OsrmRouteResponse, profile: Profile) -> Result<RouteSummary> {
    check_code(&raw.code, raw.message.as_deref())?;
    let route = raw
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| Error::not_found("OSRM found no route between the waypoints"))?;

    Ok(RouteSummary {
        profile,
        distance_meters: route.distance,
        duration_seconds: route.duration,
        distance_km: meters_to_km(route.distance),
        duration_minutes: seconds_to_minutes(route.duration),
        geometry: route.geometry,
        legs: route
            .legs
            .into_iter()
            .map(|leg| RouteLeg {
                distance_meters: leg.distance,
                duration_seconds: leg.duration,
                summary: leg.summary,
                steps: leg.steps.into_iter().map(RouteStep::from).collect(),
            })
            .collect(),
    })
}

fn check_table_shape(table: &Option<OsrmTable>, rows: usize, cols: usize, name: &str) -> Result<()> {
    match table {
        Some(t) if t.len() != rows || t.iter().any(|r| r.len() != cols) => Err(Error::parse(
            format!("OSRM {} table is not {}x{}", name, rows, cols),
        )),
        _ => Ok(()),
    }
}

fn normalize_table(raw: OsrmTableResponse, request: &MatrixRequest) -> Result<DistanceMatrix> {
    check_code(&raw.code, raw.message.as_deref())?;
    if raw.durations.is_none() && raw.distances.is_none() {
        return Err(Error::parse("OSRM table response has neither durations nor distances"));
    }
    let sources = request.source_indices();
    let destinations = request.destination_indices();
    let (rows, cols) = (sources.len(), destinations.len());
    check_table_shape(&raw.durations, rows, cols, "durations")?;
    check_table_shape(&raw.distances, rows, cols, "distances")?;

    let at = |table: &Option<OsrmTable>, i: usize, j: usize| table.as_ref().and_then(|t| t[i][j]);
    let cells = (0..rows)
        .map(|i| {
            (0..cols)
                .map(|j| MatrixCell {
                    distance_meters: at(&raw.distances, i, j),
                    duration_seconds: at(&raw.durations, i, j),
                })
                .collect()
        })
        .collect();

    Ok(DistanceMatrix {
        profile: request.profile,
        size: request.points.len(),
        sources,
        destinations,
        cells,
    })
}

fn normalize_match(raw: OsrmMatchResponse, total_points: usize, profile: Profile) -> Result<TraceMatch> {
    check_code(&raw.code, raw.message.as_deref())?;
    if raw.matchings.is_empty() {
        return Err(Error::not_found("OSRM could not match the trace to the road network"));
    }

    let matchings: Vec<Matching> = raw
        .matchings
        .into_iter()
        .map(|m| Matching {
            confidence: m.confidence,
            distance_meters: m.distance,
            duration_seconds: m.duration,
            distance_km: meters_to_km(m.distance),
            duration_minutes: seconds_to_minutes(m.duration),
            geometry: m.geometry,
        })
        .collect();

    let confidence = matchings.iter().map(|m| m.confidence).sum::<f64>() / matchings.len() as f64;
    let matched_points = raw.tracepoints.iter().filter(|t| t.is_some()).count();

    Ok(TraceMatch {
        profile,
        confidence,
        matched_points,
        total_points,
        matchings,
    })
}

// =============================================================================
// Client
// =============================================================================

/// OSRM HTTP client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: UpstreamClient,
}

impl OsrmClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: UpstreamClient::new("OSRM", &config.osrm, &config.user_agent)?,
        })
    }
}

#[async_trait]
impl RoutingBackend for OsrmClient {
    async fn route(&self, request: &RouteRequest) -> ProviderResult<RouteSummary> {
        request.validate()?;

        let path = format!(
            "route/v1/{}/{}",
            request.profile,
            coordinate_path(&request.waypoints)
        );
        let query = [
            ("overview", "full".to_string()),
            ("geometries", "geojson".to_string()),
            ("steps", "true".to_string()),
        ];
        let profile = request.profile;
        self.http
            .get_json::<OsrmRouteResponse>(&path, &query)
            .await?
            .try_map(|raw| normalize_route(raw, profile))
    }

    async fn distance_matrix(&self, request: &MatrixRequest) -> ProviderResult<DistanceMatrix> {
        request.validate()?;

        let path = format!(
            "table/v1/{}/{}",
            request.profile,
            coordinate_path(&request.points)
        );
        let mut query = vec![("annotations", "distance,duration".to_string())];
        if let Some(sources) = &request.sources {
            query.push(("sources", join_indices(sources)));
        }
        if let Some(destinations) = &request.destinations {
            query.push(("destinations", join_indices(destinations)));
        }
        self.http
            .get_json::<OsrmTableResponse>(&path, &query)
            .await?
            .try_map(|raw| normalize_table(raw, request))
    }

    async fn match_trace(&self, request: &MatchTraceRequest) -> ProviderResult<TraceMatch> {
        request.validate()?;

        let path = format!(
            "match/v1/{}/{}",
            request.profile,
            coordinate_path(&request.points)
        );
        let mut query = vec![
            ("overview", "full".to_string()),
            ("geometries", "geojson".to_string()),
        ];
        if let Some(ts) = &request.timestamps {
            let joined = ts.iter().map(i64::to_string).collect::<Vec<_>>().join(";");
            query.push(("timestamps", joined));
        }
        let total = request.points.len();
        let profile = request.profile;
        self.http
            .get_json::<OsrmMatchResponse>(&path, &query)
            .await?
            .try_map(|raw| normalize_match(raw, total, profile))
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

    fn nyc() -> GeoPoint {
        GeoPoint::new(40.7128, -74.0060)
    }

    fn boston() -> GeoPoint {
        GeoPoint::new(42.3601, -71.0589)
    }

    #[test]
    fn test_single_waypoint_rejected() {
        let err = RouteRequest::new(vec![nyc()], Profile::Car).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_coordinate_path_is_lon_lat() {
        assert_eq!(
            coordinate_path(&[nyc(), boston()]),
            "-74.006,40.7128;-71.0589,42.3601"
        );
    }

    #[test]
    fn test_profile_serde() {
        assert_eq!(serde_json::to_value(Profile::Bike).unwrap(), "bike");
        let p: Profile = serde_json::from_value(json!("foot")).unwrap();
        assert_eq!(p, Profile::Foot);
        assert!(serde_json::from_value::<Profile>(json!("plane")).is_err());
    }

    #[test]
    fn test_normalize_route_converts_units_exactly() {
        let raw: OsrmRouteResponse = serde_json::from_value(json!({
            "code": "Ok",
            "routes": [{
                "distance": 1609.0,
                "duration": 90.0,
                "geometry": {"type": "LineString", "coordinates": [[-74.006, 40.7128], [-74.0, 40.72]]},
                "legs": [{"distance": 1609.0, "duration": 90.0, "summary": "Broadway"}]
            }]
        }))
        .unwrap();

        let route = normalize_route(raw, Profile::Car).unwrap();
        assert!((route.distance_km - 1.609).abs() < 1e-9);
        assert!((route.duration_minutes - 1.5).abs() < 1e-9);
        assert_eq!(route.legs.len(), 1);
        assert_eq!(route.legs[0].summary, "Broadway");
        assert!(route.legs[0].steps.is_empty());
    }

    #[test]
    fn test_normalize_route_keeps_turn_by_turn_steps() {
        let raw: OsrmRouteResponse = serde_json::from_value(json!({
            "code": "Ok",
            "routes": [{
                "distance": 850.0,
                "duration": 70.0,
                "legs": [{
                    "distance": 850.0,
                    "duration": 70.0,
                    "steps": [
                        {"distance": 300.0, "duration": 25.0, "name": "Main St",
                         "maneuver": {"type": "depart", "location": [-74.0, 40.0]}},
                        {"distance": 550.0, "duration": 45.0, "name": "Oak Ave",
                         "maneuver": {"type": "turn", "modifier": "left"}},
                        {"distance": 0.0, "duration": 0.0, "name": "",
                         "maneuver": {"type": "arrive"}}
                    ]
                }]
            }]
        }))
        .unwrap();

        let route = normalize_route(raw, Profile::Car).unwrap();
        let steps = &route.legs[0].steps;
        assert_eq!(steps.len(), 3);
        assert_eq!(
            steps[1],
            RouteStep {
                maneuver: "turn".to_string(),
                modifier: Some("left".to_string()),
                name: "Oak Ave".to_string(),
                distance_meters: 550.0,
                duration_seconds: 45.0,
            }
        );
        assert_eq!(steps[0].modifier, None);
        assert_eq!(steps[2].maneuver, "arrive");
    }

    #[test]
    fn test_normalize_route_no_route_codes() {
        let raw: OsrmRouteResponse =
            serde_json::from_value(json!({"code": "NoRoute", "message": "Impossible route"})).unwrap();
        assert!(matches!(normalize_route(raw, Profile::Car), Err(Error::NotFound(_))));

        let raw: OsrmRouteResponse =
            serde_json::from_value(json!({"code": "TooBig", "message": "Too many points"})).unwrap();
        assert!(matches!(
            normalize_route(raw, Profile::Car),
            Err(Error::Upstream { status: None, .. })
        ));

        let raw: OsrmRouteResponse = serde_json::from_value(json!({"code": "Ok", "routes": []})).unwrap();
        assert!(matches!(normalize_route(raw, Profile::Car), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_normalize_table_with_unreachable_pair() {
        let raw: OsrmTableResponse = serde_json::from_value(json!({
            "code": "Ok",
            "durations": [[0.0, 600.0], [null, 0.0]],
            "distances": [[0.0, 9000.0], [null, 0.0]]
        }))
        .unwrap();

        let request = MatrixRequest::new(vec![nyc(), boston()], Profile::Car);
        let matrix = normalize_table(raw, &request).unwrap();
        assert_eq!(matrix.size, 2);
        assert_eq!(matrix.sources, vec![0, 1]);
        assert_eq!(matrix.destinations, vec![0, 1]);
        assert_eq!(
            matrix.cells[0][1],
            MatrixCell {
                distance_meters: Some(9000.0),
                duration_seconds: Some(600.0)
            }
        );
        assert_eq!(matrix.cells[1][0].duration_seconds, None);
    }

    #[test]
    fn test_normalize_table_shape_mismatch() {
        let request = MatrixRequest::new(vec![nyc(), boston()], Profile::Car);
        let raw: OsrmTableResponse =
            serde_json::from_value(json!({"code": "Ok", "durations": [[0.0, 1.0]]})).unwrap();
        assert!(matches!(normalize_table(raw, &request), Err(Error::Parse(_))));

        let raw: OsrmTableResponse = serde_json::from_value(json!({"code": "Ok"})).unwrap();
        assert!(matches!(normalize_table(raw, &request), Err(Error::Parse(_))));
    }

    #[test]
    fn test_normalize_table_with_sources_and_destinations() {
        let mut request = MatrixRequest::new(
            vec![nyc(), boston(), GeoPoint::new(39.9526, -75.1652)],
            Profile::Car,
        );
        request.sources = Some(vec![0]);
        request.destinations = Some(vec![1, 2]);
        let raw: OsrmTableResponse = serde_json::from_value(json!({
            "code": "Ok",
            "durations": [[13000.0, 5400.0]],
            "distances": [[346000.0, 152000.0]]
        }))
        .unwrap();

        let matrix = normalize_table(raw, &request).unwrap();
        assert_eq!(matrix.size, 3);
        assert_eq!(matrix.sources, vec![0]);
        assert_eq!(matrix.destinations, vec![1, 2]);
        assert_eq!(matrix.cells.len(), 1);
        assert_eq!(matrix.cells[0][1].distance_meters, Some(152000.0));

        let raw: OsrmTableResponse =
            serde_json::from_value(json!({"code": "Ok", "durations": [[0.0, 1.0, 2.0]]})).unwrap();
        assert!(matches!(normalize_table(raw, &request), Err(Error::Parse(_))));
    }

    #[test]
    fn test_matrix_index_validation() {
        let mut request = MatrixRequest::new(vec![nyc(), boston()], Profile::Car);
        assert!(request.validate().is_ok());

        request.sources = Some(vec![]);
        assert!(request.validate().unwrap_err().to_string().contains("sources must not be empty"));

        request.sources = Some(vec![0]);
        request.destinations = Some(vec![1, 2]);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("destinations index 2"));
    }

    #[test]
    fn test_normalize_match_confidence_and_counts() {
        let raw: OsrmMatchResponse = serde_json::from_value(json!({
            "code": "Ok",
            "matchings": [
                {"confidence": 0.9, "distance": 1000.0, "duration": 120.0, "geometry": null},
                {"confidence": 0.5, "distance": 500.0, "duration": 60.0, "geometry": null}
            ],
            "tracepoints": [{"name": "a"}, null, {"name": "b"}]
        }))
        .unwrap();

        let matched = normalize_match(raw, 3, Profile::Foot).unwrap();
        assert!((matched.confidence - 0.7).abs() < 1e-9);
        assert_eq!(matched.matched_points, 2);
        assert_eq!(matched.total_points, 3);
        assert_eq!(matched.matchings[0].duration_minutes, 2.0);
    }

    #[test]
    fn test_trace_timestamp_validation() {
        let mut req = MatchTraceRequest::new(vec![nyc(), boston()], Profile::Car);
        req.timestamps = Some(vec![100]);
        assert!(req.validate().is_err());
        req.timestamps = Some(vec![100, 100]);
        assert!(req.validate().is_err());
        req.timestamps = Some(vec![100, 160]);
        assert!(req.validate().is_ok());
    }
}
