//! Core types for map-tools.
//!
//! - **IDs**: request identifiers
//! - **Errors**: application error type with thiserror derives
//! - **Config**: upstream endpoints, timeouts and identifying header
//! - **Geo**: the latitude/longitude point shared by tools and clients

mod config;
mod errors;
mod geo;
mod ids;

pub use config::{
    Config, EndpointConfig, DEFAULT_NOMINATIM_URL, DEFAULT_OSRM_URL, DEFAULT_USER_AGENT,
    NOMINATIM_BASE_URL, NOMINATIM_TIMEOUT_SECONDS, OSRM_BASE_URL, OSRM_TIMEOUT_SECONDS, USER_AGENT,
};
pub use errors::{Error, Result};
pub use geo::GeoPoint;
pub use ids::RequestId;
