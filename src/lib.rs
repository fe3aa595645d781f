//! # map-tools - Map Service Tool Layer
//!
//! Exposes heterogeneous map backends as one set of callable tools that share
//! a request/response envelope:
//! - Geocoding (Nominatim): forward, reverse, and POI search
//! - Routing (OSRM): routes, distance matrices, and GPS trace matching
//! - Tile provider metadata from a compiled-in table
//!
//! ## Architecture
//!
//! ```text
//!                  ┌────────────────────────────────────┐
//!  ToolRequest  →  │            Dispatcher              │  →  ToolResponse
//!                  │  ToolCatalog: validate + defaults  │
//!                  │  ┌───────────┬───────────┬───────┐ │
//!                  │  │ Geocoding │  Routing  │ Tiles │ │
//!                  │  │  Backend  │  Backend  │ table │ │
//!                  │  └───────────┴───────────┴───────┘ │
//!                  └────────────────────────────────────┘
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod dispatch;
pub mod envelope;
pub mod providers;
pub mod tiles;
pub mod tools;
pub mod types;
pub mod validation;

// Internal utilities
pub mod observability;

pub use dispatch::Dispatcher;
pub use envelope::{ErrorCode, ToolRequest, ToolResponse, ToolStatus, ToolUsage};
pub use tools::ToolCatalog;
pub use types::{Config, Error, Result};
