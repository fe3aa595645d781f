//! Tool infrastructure — registry, parameter validation, schema export.

pub mod catalog;

pub use catalog::{ParamDef, ParamType, ServerInfo, ServerKind, ToolCatalog, ToolEntry, ToolKind};
