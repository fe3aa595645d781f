//! Provider clients — one per upstream backend family.
//!
//! Each client turns a typed request into a single upstream GET and maps the
//! upstream JSON into a normalized payload, or a classified failure. The
//! traits are the seam the dispatcher binds to, so tests can swap in doubles.

pub mod geocoding;
pub mod http;
pub mod routing;
pub mod units;

use async_trait::async_trait;

use crate::types::{Error, GeoPoint, Result};

pub use geocoding::{
    Address, ForwardGeocodeRequest, NominatimClient, Place, Poi, PoiDetails, PoiSearch,
    PoiSearchRequest, ReverseGeocode,
};
pub use http::UpstreamClient;
pub use routing::{
    DistanceMatrix, MatchTraceRequest, Matching, MatrixCell, MatrixRequest, OsrmClient, Profile,
    RouteLeg, RouteRequest, RouteStep, RouteSummary, TraceMatch,
};

/// Successful upstream exchange: the normalized value plus the URL called.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub endpoint: String,
    pub value: T,
}

impl<T> Fetched<T> {
    pub fn new(endpoint: impl Into<String>, value: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            value,
        }
    }

    /// Normalize the raw value, keeping the endpoint on either outcome.
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> ProviderResult<U> {
        match f(self.value) {
            Ok(value) => Ok(Fetched {
                endpoint: self.endpoint,
                value,
            }),
            Err(error) => Err(ProviderFailure::new(Some(self.endpoint), error)),
        }
    }
}

/// Failed exchange. `endpoint` is `None` when the call never left the process
/// (input validation, URL construction).
#[derive(Debug)]
pub struct ProviderFailure {
    pub endpoint: Option<String>,
    pub error: Error,
}

impl ProviderFailure {
    pub fn new(endpoint: Option<String>, error: Error) -> Self {
        Self { endpoint, error }
    }
}

impl From<Error> for ProviderFailure {
    fn from(error: Error) -> Self {
        Self::new(None, error)
    }
}

pub type ProviderResult<T> = std::result::Result<Fetched<T>, ProviderFailure>;

/// Geocoding backend (Nominatim-compatible).
#[async_trait]
pub trait GeocodingBackend: Send + Sync {
    /// Free-text address or place name to candidate coordinates.
    async fn forward_geocode(&self, request: &ForwardGeocodeRequest) -> ProviderResult<Vec<Place>>;

    /// Coordinates to a labelled address.
    async fn reverse_geocode(&self, point: GeoPoint) -> ProviderResult<ReverseGeocode>;

    /// Points of interest matching `query` within a radius.
    async fn search_poi(&self, request: &PoiSearchRequest) -> ProviderResult<PoiSearch>;
}

/// Routing backend (OSRM-compatible).
#[async_trait]
pub trait RoutingBackend: Send + Sync {
    /// Best route through ordered waypoints.
    async fn route(&self, request: &RouteRequest) -> ProviderResult<RouteSummary>;

    /// Distance/duration matrix between source and destination points.
    async fn distance_matrix(&self, request: &MatrixRequest) -> ProviderResult<DistanceMatrix>;

    /// Snap a time-ordered GPS trace onto the road network.
    async fn match_trace(&self, request: &MatchTraceRequest) -> ProviderResult<TraceMatch>;
}
