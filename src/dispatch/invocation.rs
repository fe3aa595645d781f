//! Typed tool invocations.
//!
//! After schema validation the raw JSON arguments are decoded into one
//! variant per [`ToolKind`] and run through the same range checks the
//! provider clients apply, so nothing reaches a backend unchecked.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::providers::{
    ForwardGeocodeRequest, MatchTraceRequest, MatrixRequest, PoiSearchRequest, RouteRequest,
};
use crate::tools::ToolKind;
use crate::types::{Error, GeoPoint, Result};
use crate::validation::{validate_latitude, validate_longitude, validate_non_blank};

/// Arguments for the tile lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderIdArgs {
    pub provider_id: String,
}

/// A decoded, validated tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    ForwardGeocode(ForwardGeocodeRequest),
    ReverseGeocode(GeoPoint),
    PoiSearch(PoiSearchRequest),
    Route(RouteRequest),
    DistanceMatrix(MatrixRequest),
    MatchTrace(MatchTraceRequest),
    ListTileProviders,
    GetTileProviderInfo(ProviderIdArgs),
    GetTileAttribution(ProviderIdArgs),
}

impl Invocation {
    /// Decode `args` for `kind` and check every value.
    pub fn parse(kind: ToolKind, args: Value) -> Result<Self> {
        let invocation = match kind {
            ToolKind::ForwardGeocode => Invocation::ForwardGeocode(decode(args)?),
            ToolKind::ReverseGeocode => Invocation::ReverseGeocode(decode(args)?),
            ToolKind::PoiSearch => Invocation::PoiSearch(decode(args)?),
            ToolKind::Route => Invocation::Route(decode(args)?),
            ToolKind::DistanceMatrix => Invocation::DistanceMatrix(decode(args)?),
            ToolKind::MatchTrace => Invocation::MatchTrace(decode(args)?),
            ToolKind::ListTileProviders => Invocation::ListTileProviders,
            ToolKind::GetTileProviderInfo => Invocation::GetTileProviderInfo(decode(args)?),
            ToolKind::GetTileAttribution => Invocation::GetTileAttribution(decode(args)?),
        };
        invocation.validate()?;
        Ok(invocation)
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Invocation::ForwardGeocode(_) => ToolKind::ForwardGeocode,
            Invocation::ReverseGeocode(_) => ToolKind::ReverseGeocode,
            Invocation::PoiSearch(_) => ToolKind::PoiSearch,
            Invocation::Route(_) => ToolKind::Route,
            Invocation::DistanceMatrix(_) => ToolKind::DistanceMatrix,
            Invocation::MatchTrace(_) => ToolKind::MatchTrace,
            Invocation::ListTileProviders => ToolKind::ListTileProviders,
            Invocation::GetTileProviderInfo(_) => ToolKind::GetTileProviderInfo,
            Invocation::GetTileAttribution(_) => ToolKind::GetTileAttribution,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Invocation::ForwardGeocode(req) => req.validate(),
            Invocation::ReverseGeocode(point) => {
                validate_latitude(point.lat, "lat")?;
                validate_longitude(point.lon, "lon")
            }
            Invocation::PoiSearch(req) => req.validate(),
            Invocation::Route(req) => req.validate(),
            Invocation::DistanceMatrix(req) => req.validate(),
            Invocation::MatchTrace(req) => req.validate(),
            Invocation::ListTileProviders => Ok(()),
            Invocation::GetTileProviderInfo(args) | Invocation::GetTileAttribution(args) => {
                validate_non_blank(&args.provider_id, "provider_id")
            }
        }
    }
}

fn decode<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| Error::invalid_input(format!("invalid arguments: {}", e)))
}
