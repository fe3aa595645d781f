//! Compiled-in tile provider metadata.
//!
//! Pure lookups over an immutable table; nothing here performs I/O.

use schemars::JsonSchema;
use serde::Serialize;

use crate::types::{Error, Result};

/// One raster tile source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TileProviderRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub attribution: &'static str,
    /// `{z}`, `{x}`, `{y}` placeholders.
    pub url_template: &'static str,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub license: &'static str,
}

/// Short listing entry returned by `list_tile_providers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TileProviderSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<&TileProviderRecord> for TileProviderSummary {
    fn from(record: &TileProviderRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
        }
    }
}

/// Payload of `list_tile_providers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TileProviderList {
    pub providers: Vec<TileProviderSummary>,
    pub count: usize,
}

/// Payload of `get_tile_attribution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TileAttribution {
    pub provider_id: &'static str,
    pub attribution: &'static str,
}

const OSM_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
const STADIA_ATTRIBUTION: &str = "Map tiles by Stadia Maps, Data by OpenStreetMap";
const CARTO_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors &copy; CARTO";

static PROVIDERS: [TileProviderRecord; 6] = [
    TileProviderRecord {
        id: "openstreetmap",
        name: "OpenStreetMap",
        description: "The Free and Open Collaborative Mapping Project",
        attribution: OSM_ATTRIBUTION,
        url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        min_zoom: 0,
        max_zoom: 19,
        license: "ODbL",
    },
    TileProviderRecord {
        id: "stamen_toner",
        name: "Stamen Toner",
        description: "Minimalist map tiles",
        attribution: STADIA_ATTRIBUTION,
        url_template: "https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}.png",
        min_zoom: 0,
        max_zoom: 20,
        license: "CC BY 3.0",
    },
    TileProviderRecord {
        id: "stamen_tonerbackground",
        name: "Stamen Toner Background",
        description: "Toner map without labels",
        attribution: STADIA_ATTRIBUTION,
        url_template: "https://tiles.stadiamaps.com/tiles/stamen_toner_background/{z}/{x}/{y}.png",
        min_zoom: 0,
        max_zoom: 20,
        license: "CC BY 3.0",
    },
    TileProviderRecord {
        id: "carto_positron",
        name: "CARTO Positron",
        description: "Light basemap with detailed labels",
        attribution: CARTO_ATTRIBUTION,
        url_template: "https://cartodb-basemaps-a.global.ssl.fastly.net/light_all/{z}/{x}/{y}.png",
        min_zoom: 0,
        max_zoom: 19,
        license: "CC BY 4.0",
    },
    TileProviderRecord {
        id: "carto_voyager",
        name: "CARTO Voyager",
        description: "Colorful and detailed basemap",
        attribution: CARTO_ATTRIBUTION,
        url_template: "https://cartodb-basemaps-a.global.ssl.fastly.net/rastered_and_labels/{z}/{x}/{y}.png",
        min_zoom: 0,
        max_zoom: 19,
        license: "CC BY 4.0",
    },
    TileProviderRecord {
        id: "usgs_topo",
        name: "USGS Topo",
        description: "USGS topographic maps",
        attribution: "USGS",
        url_template: "https://basemap.nationalmap.gov/arcgis/rest/services/USGSTopo/MapServer/tile/{z}/{y}/{x}",
        min_zoom: 0,
        max_zoom: 16,
        license: "Public Domain",
    },
];

/// Every provider, in a fixed order.
pub fn list_providers() -> &'static [TileProviderRecord] {
    &PROVIDERS
}

/// Provider ids, in catalog order.
pub fn provider_ids() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.id).collect()
}

pub fn summarize() -> TileProviderList {
    let providers: Vec<TileProviderSummary> = PROVIDERS.iter().map(TileProviderSummary::from).collect();
    TileProviderList {
        count: providers.len(),
        providers,
    }
}

pub fn get_provider(id: &str) -> Result<&'static TileProviderRecord> {
    PROVIDERS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| Error::not_found(format!("tile provider '{}' not found", id)))
}

pub fn get_attribution(id: &str) -> Result<&'static str> {
    get_provider(id).map(|p| p.attribution)
}

pub fn attribution_for(id: &str) -> Result<TileAttribution> {
    get_provider(id).map(|p| TileAttribution {
        provider_id: p.id,
        attribution: p.attribution,
    })
}
