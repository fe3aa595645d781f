//! Tool catalog — typed metadata, parameter validation, schema export.
//!
//! Every tool is registered once while the catalog is built and the set is
//! immutable afterwards. Each entry carries a [`ToolKind`] that binds it to
//! its handler, so dispatch is an exhaustive match rather than a string
//! lookup table.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use crate::providers::geocoding::{
    DEFAULT_FORWARD_LIMIT, DEFAULT_POI_LIMIT, DEFAULT_POI_RADIUS_M, MAX_FORWARD_LIMIT, MAX_POI_LIMIT,
    MAX_POI_RADIUS_M,
};
use crate::providers::routing::{MAX_MATRIX_POINTS, MAX_TRACE_POINTS, MAX_WAYPOINTS};
use crate::providers::{DistanceMatrix, Place, PoiSearch, Profile, ReverseGeocode, RouteSummary, TraceMatch};
use crate::tiles::{self, TileAttribution, TileProviderList, TileProviderRecord};
use crate::types::{Config, Error, GeoPoint, Result};
use crate::validation::{LAT_RANGE, LON_RANGE};

// =============================================================================
// Parameter types
// =============================================================================

/// Parameter type for tool inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    /// String with at least one non-whitespace character.
    NonBlankString,
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Enum(Vec<String>),
    /// `{lat, lon}` object or `[lat, lon]` pair.
    Point,
    PointList {
        min_items: usize,
        max_items: usize,
    },
    NumberList,
    /// Positions into a sibling point list.
    IndexList {
        max_items: usize,
    },
    Optional(Box<ParamType>),
}

impl ParamType {
    pub fn latitude() -> Self {
        ParamType::Number {
            min: Some(LAT_RANGE.0),
            max: Some(LAT_RANGE.1),
        }
    }

    pub fn longitude() -> Self {
        ParamType::Number {
            min: Some(LON_RANGE.0),
            max: Some(LON_RANGE.1),
        }
    }

    fn profile() -> Self {
        ParamType::Enum(Profile::ALL.iter().map(|p| p.as_str().to_string()).collect())
    }

    /// Validate a JSON value against this parameter type.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match self {
            ParamType::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("expected string, got {}", value_type_name(value)))
                }
            }
            ParamType::NonBlankString => match value.as_str() {
                Some(s) if s.trim().is_empty() => Err("must not be blank".to_string()),
                Some(_) => Ok(()),
                None => Err(format!("expected string, got {}", value_type_name(value))),
            },
            ParamType::Integer { min, max } => {
                let n = value
                    .as_i64()
                    .ok_or_else(|| format!("expected integer, got {}", value_type_name(value)))?;
                check_bounds(n, *min, *max)
            }
            ParamType::Number { min, max } => {
                let n = value
                    .as_f64()
                    .ok_or_else(|| format!("expected number, got {}", value_type_name(value)))?;
                check_bounds(n, *min, *max)
            }
            ParamType::Enum(variants) => {
                if let Some(s) = value.as_str() {
                    if variants.iter().any(|v| v == s) {
                        Ok(())
                    } else {
                        Err(format!(
                            "invalid enum value '{}', expected one of: {}",
                            s,
                            variants.join(", ")
                        ))
                    }
                } else {
                    Err(format!("expected string for enum, got {}", value_type_name(value)))
                }
            }
            ParamType::Point => validate_point_value(value),
            ParamType::PointList { min_items, max_items } => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| format!("expected array of points, got {}", value_type_name(value)))?;
                if arr.len() < *min_items {
                    return Err(format!("needs at least {} points, got {}", min_items, arr.len()));
                }
                if arr.len() > *max_items {
                    return Err(format!("accepts at most {} points, got {}", max_items, arr.len()));
                }
                for (i, item) in arr.iter().enumerate() {
                    validate_point_value(item).map_err(|e| format!("point {}: {}", i, e))?;
                }
                Ok(())
            }
            ParamType::NumberList => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| format!("expected array, got {}", value_type_name(value)))?;
                for (i, item) in arr.iter().enumerate() {
                    if !item.is_number() {
                        return Err(format!(
                            "expected number at index {}, got {}",
                            i,
                            value_type_name(item)
                        ));
                    }
                }
                Ok(())
            }
            ParamType::IndexList { max_items } => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| format!("expected array of indices, got {}", value_type_name(value)))?;
                if arr.is_empty() {
                    return Err("needs at least 1 index".to_string());
                }
                if arr.len() > *max_items {
                    return Err(format!("accepts at most {} indices, got {}", max_items, arr.len()));
                }
                for (i, item) in arr.iter().enumerate() {
                    if item.as_u64().is_none() {
                        return Err(format!("expected non-negative integer at index {}, got {}", i, item));
                    }
                }
                Ok(())
            }
            ParamType::Optional(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    inner.validate(value)
                }
            }
        }
    }

    /// Human-readable type name for prompt generation.
    pub fn display_name(&self) -> String {
        match self {
            ParamType::String | ParamType::NonBlankString => "string".to_string(),
            ParamType::Integer { .. } => "integer".to_string(),
            ParamType::Number { .. } => "number".to_string(),
            ParamType::Enum(variants) => format!("enum({})", variants.join("|")),
            ParamType::Point => "point".to_string(),
            ParamType::PointList { .. } => "point[]".to_string(),
            ParamType::NumberList => "number[]".to_string(),
            ParamType::IndexList { .. } => "integer[]".to_string(),
            ParamType::Optional(inner) => inner.display_name(),
        }
    }

    /// JSON-Schema fragment for function-calling export.
    pub fn json_schema(&self) -> Value {
        match self {
            ParamType::String => json!({"type": "string"}),
            ParamType::NonBlankString => json!({"type": "string", "minLength": 1}),
            ParamType::Integer { min, max } => bounded("integer", min.map(Value::from), max.map(Value::from)),
            ParamType::Number { min, max } => bounded("number", min.map(Value::from), max.map(Value::from)),
            ParamType::Enum(variants) => json!({"type": "string", "enum": variants}),
            ParamType::Point => point_schema(),
            ParamType::PointList { min_items, max_items } => json!({
                "type": "array",
                "items": point_schema(),
                "minItems": min_items,
                "maxItems": max_items,
            }),
            ParamType::NumberList => json!({"type": "array", "items": {"type": "number"}}),
            ParamType::IndexList { max_items } => json!({
                "type": "array",
                "items": {"type": "integer", "minimum": 0},
                "minItems": 1,
                "maxItems": max_items,
            }),
            ParamType::Optional(inner) => inner.json_schema(),
        }
    }
}

fn check_bounds<T>(n: T, min: Option<T>, max: Option<T>) -> std::result::Result<(), String>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if let Some(lo) = min {
        if n < lo {
            return Err(format!("must be at least {}, got {}", lo, n));
        }
    }
    if let Some(hi) = max {
        if n > hi {
            return Err(format!("must be at most {}, got {}", hi, n));
        }
    }
    Ok(())
}

fn validate_point_value(value: &Value) -> std::result::Result<(), String> {
    let point: GeoPoint = serde_json::from_value(value.clone())
        .map_err(|_| format!("expected point {{lat, lon}} or [lat, lon], got {}", value_type_name(value)))?;
    check_bounds(point.lat, Some(LAT_RANGE.0), Some(LAT_RANGE.1)).map_err(|e| format!("lat {}", e))?;
    check_bounds(point.lon, Some(LON_RANGE.0), Some(LON_RANGE.1)).map_err(|e| format!("lon {}", e))
}

fn bounded(kind: &str, min: Option<Value>, max: Option<Value>) -> Value {
    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::from(kind));
    if let Some(min) = min {
        schema.insert("minimum".to_string(), min);
    }
    if let Some(max) = max {
        schema.insert("maximum".to_string(), max);
    }
    Value::Object(schema)
}

fn point_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "lat": {"type": "number", "minimum": LAT_RANGE.0, "maximum": LAT_RANGE.1},
            "lon": {"type": "number", "minimum": LON_RANGE.0, "maximum": LON_RANGE.1},
        },
        "required": ["lat", "lon"],
    })
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Parameter definition
// =============================================================================

/// A single parameter definition for a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamDef {
    pub fn required(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
            default: None,
        }
    }

    pub fn optional(name: &str, inner: ParamType, description: &str) -> Self {
        Self::required(name, ParamType::Optional(Box::new(inner)), description)
    }

    pub fn with_default(name: &str, param_type: ParamType, description: &str, default: Value) -> Self {
        Self {
            default: Some(default),
            ..Self::required(name, param_type, description)
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none() && !matches!(self.param_type, ParamType::Optional(_))
    }

    fn property_schema(&self) -> Value {
        let mut schema = self.param_type.json_schema();
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("description".to_string(), Value::from(self.description.as_str()));
            if let Some(default) = &self.default {
                obj.insert("default".to_string(), default.clone());
            }
        }
        schema
    }
}

// =============================================================================
// Tool kinds & servers
// =============================================================================

/// Handler binding for a registered tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    ForwardGeocode,
    ReverseGeocode,
    PoiSearch,
    Route,
    DistanceMatrix,
    MatchTrace,
    ListTileProviders,
    GetTileProviderInfo,
    GetTileAttribution,
}

impl ToolKind {
    pub fn server(self) -> ServerKind {
        match self {
            ToolKind::ForwardGeocode | ToolKind::ReverseGeocode | ToolKind::PoiSearch => ServerKind::Geocoding,
            ToolKind::Route | ToolKind::DistanceMatrix | ToolKind::MatchTrace => ServerKind::Routing,
            ToolKind::ListTileProviders | ToolKind::GetTileProviderInfo | ToolKind::GetTileAttribution => {
                ServerKind::Tiles
            }
        }
    }

    /// JSON Schema of the `data` payload this tool returns on success.
    pub fn output_schema(self) -> Result<Value> {
        let schema = match self {
            ToolKind::ForwardGeocode => schema_for!(Vec<Place>),
            ToolKind::ReverseGeocode => schema_for!(ReverseGeocode),
            ToolKind::PoiSearch => schema_for!(PoiSearch),
            ToolKind::Route => schema_for!(RouteSummary),
            ToolKind::DistanceMatrix => schema_for!(DistanceMatrix),
            ToolKind::MatchTrace => schema_for!(TraceMatch),
            ToolKind::ListTileProviders => schema_for!(TileProviderList),
            ToolKind::GetTileProviderInfo => schema_for!(TileProviderRecord),
            ToolKind::GetTileAttribution => schema_for!(TileAttribution),
        };
        Ok(serde_json::to_value(schema)?)
    }
}

/// Backend family a tool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServerKind {
    Geocoding,
    Routing,
    Tiles,
}

impl ServerKind {
    pub const ALL: [ServerKind; 3] = [ServerKind::Geocoding, ServerKind::Routing, ServerKind::Tiles];

    pub fn display_name(self) -> &'static str {
        match self {
            ServerKind::Geocoding => "Geocoding Server",
            ServerKind::Routing => "Routing Server",
            ServerKind::Tiles => "Tiles/Metadata Server",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ServerKind::Geocoding => "Nominatim geocoding: forward and reverse lookup and POI search",
            ServerKind::Routing => "OSRM routing: routes, distance matrices and trace matching",
            ServerKind::Tiles => "Tile provider metadata: URL templates and attributions",
        }
    }
}

/// Summary of one backend family and its tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerInfo {
    pub kind: ServerKind,
    pub name: &'static str,
    pub description: &'static str,
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<&'static str>,
}

// =============================================================================
// Tool entry
// =============================================================================

/// Complete tool metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamDef>,
    pub kind: ToolKind,
}

impl ToolEntry {
    pub fn new(name: &str, kind: ToolKind, description: &str, parameters: Vec<ParamDef>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
            kind,
        }
    }

    pub fn server(&self) -> ServerKind {
        self.kind.server()
    }

    /// Generate a prompt line for this tool.
    ///
    /// Format: `- tool_name(param1: type, param2?: type): description`
    pub fn to_prompt_line(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                let optional = if p.is_required() { "" } else { "?" };
                format!("{}{}: {}", p.name, optional, p.param_type.display_name())
            })
            .collect();

        format!("- {}({}): {}", self.name, params.join(", "), self.description)
    }

    /// Function-calling schema (`{"type": "function", "function": {...}}`).
    pub fn to_function_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.property_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                },
            },
        })
    }
}

// =============================================================================
// Tool catalog
// =============================================================================

/// Ordered, immutable tool registry.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the nine built-in map tools.
    pub fn standard() -> Self {
        let entries = standard_entries();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Register a tool entry. Names must be non-empty and unique.
    pub fn register(&mut self, entry: ToolEntry) -> Result<()> {
        if entry.name.trim().is_empty() {
            return Err(Error::invalid_input("Tool name cannot be empty"));
        }
        if self.index.contains_key(&entry.name) {
            return Err(Error::invalid_input(format!("Tool already registered: {}", entry.name)));
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Tools in registration order.
    pub fn list_tools(&self) -> &[ToolEntry] {
        &self.entries
    }

    pub fn get_schema(&self, name: &str) -> Result<&ToolEntry> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| Error::unknown_tool(name))
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Validate parameters against a tool's parameter definitions.
    ///
    /// Returns a list of validation errors (empty = valid).
    pub fn validate_params(&self, name: &str, params: &Value) -> Result<Vec<String>> {
        let entry = self.get_schema(name)?;

        let empty = Map::new();
        let param_map = match params {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Ok(vec![format!(
                    "Parameters must be a JSON object, got {}",
                    value_type_name(other)
                )])
            }
        };

        let mut errors = Vec::new();

        for param_def in &entry.parameters {
            match param_map.get(&param_def.name) {
                None if param_def.is_required() => {
                    errors.push(format!("Missing required parameter: {}", param_def.name));
                }
                None => {}
                Some(value) => {
                    if let Err(e) = param_def.param_type.validate(value) {
                        errors.push(format!("Parameter '{}': {}", param_def.name, e));
                    }
                }
            }
        }

        for key in param_map.keys() {
            if !entry.parameters.iter().any(|p| &p.name == key) {
                errors.push(format!("Unknown parameter: {}", key));
            }
        }

        Ok(errors)
    }

    /// Fill in default values for missing optional parameters.
    pub fn fill_defaults(&self, name: &str, params: &mut Value) -> Result<()> {
        let entry = self.get_schema(name)?;

        if params.is_null() {
            *params = Value::Object(Map::new());
        }
        if let Some(map) = params.as_object_mut() {
            for param_def in &entry.parameters {
                if !map.contains_key(&param_def.name) {
                    if let Some(default) = &param_def.default {
                        map.insert(param_def.name.clone(), default.clone());
                    }
                }
            }
        }

        Ok(())
    }

    /// Every tool in function-calling schema form, registration order.
    pub fn to_function_schemas(&self) -> Vec<Value> {
        self.entries.iter().map(ToolEntry::to_function_schema).collect()
    }

    /// Generate formatted prompt section for LLM consumption.
    pub fn generate_prompt(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push("Available tools:".to_string());
        for entry in &self.entries {
            lines.push(entry.to_prompt_line());
        }
        lines.join("\n")
    }

    /// Tools grouped by backend family.
    pub fn servers(&self, config: &Config) -> Vec<ServerInfo> {
        ServerKind::ALL
            .iter()
            .map(|&kind| ServerInfo {
                kind,
                name: kind.display_name(),
                description: kind.description(),
                tools: self
                    .entries
                    .iter()
                    .filter(|e| e.server() == kind)
                    .map(|e| e.name.clone())
                    .collect(),
                base_url: match kind {
                    ServerKind::Geocoding => Some(config.nominatim.base_url.clone()),
                    ServerKind::Routing => Some(config.osrm.base_url.clone()),
                    ServerKind::Tiles => None,
                },
                resources: match kind {
                    ServerKind::Tiles => tiles::provider_ids(),
                    _ => Vec::new(),
                },
            })
            .collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Built-in tools
// =============================================================================

fn profile_param() -> ParamDef {
    ParamDef::with_default(
        "profile",
        ParamType::profile(),
        "Travel mode: 'car', 'bike', or 'foot'",
        json!(Profile::default().as_str()),
    )
}

fn provider_id_param() -> ParamDef {
    ParamDef::required(
        "provider_id",
        ParamType::NonBlankString,
        "Tile provider id (e.g. 'openstreetmap', 'carto_positron')",
    )
}

fn standard_entries() -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(
            "forward_geocode",
            ToolKind::ForwardGeocode,
            "Convert an address or place name to geographic coordinates",
            vec![
                ParamDef::required(
                    "query",
                    ParamType::NonBlankString,
                    "Address or place name (e.g. 'New York City', '1600 Pennsylvania Avenue')",
                ),
                ParamDef::with_default(
                    "limit",
                    ParamType::Integer {
                        min: Some(1),
                        max: Some(i64::from(MAX_FORWARD_LIMIT)),
                    },
                    "Maximum number of results",
                    json!(DEFAULT_FORWARD_LIMIT),
                ),
            ],
        ),
        ToolEntry::new(
            "reverse_geocode",
            ToolKind::ReverseGeocode,
            "Convert geographic coordinates to an address",
            vec![
                ParamDef::required("lat", ParamType::latitude(), "Latitude in decimal degrees (e.g. 40.7128)"),
                ParamDef::required("lon", ParamType::longitude(), "Longitude in decimal degrees (e.g. -74.0060)"),
            ],
        ),
        ToolEntry::new(
            "poi_search",
            ToolKind::PoiSearch,
            "Search for points of interest (restaurants, hotels, museums) near a location",
            vec![
                ParamDef::required("query", ParamType::NonBlankString, "Kind of place to look for"),
                ParamDef::required("near", ParamType::Point, "Center of the search as {lat, lon}"),
                ParamDef::with_default(
                    "radius",
                    ParamType::Number {
                        min: Some(1.0),
                        max: Some(MAX_POI_RADIUS_M),
                    },
                    "Search radius in meters",
                    json!(DEFAULT_POI_RADIUS_M),
                ),
                ParamDef::with_default(
                    "limit",
                    ParamType::Integer {
                        min: Some(1),
                        max: Some(i64::from(MAX_POI_LIMIT)),
                    },
                    "Maximum number of results, nearest first",
                    json!(DEFAULT_POI_LIMIT),
                ),
            ],
        ),
        ToolEntry::new(
            "route",
            ToolKind::Route,
            "Calculate the best route through an ordered list of waypoints",
            vec![
                ParamDef::required(
                    "waypoints",
                    ParamType::PointList {
                        min_items: 2,
                        max_items: MAX_WAYPOINTS,
                    },
                    "Ordered stops as {lat, lon} points, start first",
                ),
                profile_param(),
            ],
        ),
        ToolEntry::new(
            "distance_matrix",
            ToolKind::DistanceMatrix,
            "Calculate distances and travel times between source and destination points",
            vec![
                ParamDef::required(
                    "points",
                    ParamType::PointList {
                        min_items: 2,
                        max_items: MAX_MATRIX_POINTS,
                    },
                    "Points as {lat, lon}",
                ),
                ParamDef::optional(
                    "sources",
                    ParamType::IndexList {
                        max_items: MAX_MATRIX_POINTS,
                    },
                    "Indices into points to route from (default: all)",
                ),
                ParamDef::optional(
                    "destinations",
                    ParamType::IndexList {
                        max_items: MAX_MATRIX_POINTS,
                    },
                    "Indices into points to route to (default: all)",
                ),
                profile_param(),
            ],
        ),
        ToolEntry::new(
            "match_trace",
            ToolKind::MatchTrace,
            "Match a GPS trace to the road network",
            vec![
                ParamDef::required(
                    "points",
                    ParamType::PointList {
                        min_items: 2,
                        max_items: MAX_TRACE_POINTS,
                    },
                    "Trace points as {lat, lon}, in time order",
                ),
                ParamDef::optional(
                    "timestamps",
                    ParamType::NumberList,
                    "Unix timestamps in seconds, one per point",
                ),
                profile_param(),
            ],
        ),
        ToolEntry::new(
            "list_tile_providers",
            ToolKind::ListTileProviders,
            "List all available tile layer providers",
            vec![],
        ),
        ToolEntry::new(
            "get_tile_provider_info",
            ToolKind::GetTileProviderInfo,
            "Get details of a tile provider including URL template and attribution",
            vec![provider_id_param()],
        ),
        ToolEntry::new(
            "get_tile_attribution",
            ToolKind::GetTileAttribution,
            "Get the attribution string for a tile provider",
            vec![provider_id_param()],
        ),
    ]
}

// =============================================================================
// Tests
// =============================================================================
