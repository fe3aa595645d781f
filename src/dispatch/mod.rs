//! Dispatcher — validates a tool call, routes it to its backend, and wraps
//! every outcome in a [`ToolResponse`].
//!
//! Per-call phases:
//! ```text
//! Received ─┬─> Validated ──> Executing ─┬─> Completed
//!           │                            └─> Failed
//!           └─> ValidationFailed
//! ```
//! The dispatcher holds only immutable state and never returns an `Err` or
//! lets a panic escape; every failure becomes an error envelope.

pub mod invocation;
pub mod recovery;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::envelope::{ToolRequest, ToolResponse, ToolUsage};
use crate::providers::{
    GeocodingBackend, NominatimClient, OsrmClient, ProviderResult, RoutingBackend,
};
use crate::tiles;
use crate::tools::ToolCatalog;
use crate::types::{Config, Error, RequestId, Result};

pub use invocation::{Invocation, ProviderIdArgs};

// =============================================================================
// Phases
// =============================================================================

/// Lifecycle of a single tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPhase {
    Received,
    Validated,
    ValidationFailed,
    Executing,
    Completed,
    Failed,
}

impl DispatchPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchPhase::Received => "received",
            DispatchPhase::Validated => "validated",
            DispatchPhase::ValidationFailed => "validation_failed",
            DispatchPhase::Executing => "executing",
            DispatchPhase::Completed => "completed",
            DispatchPhase::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DispatchPhase::ValidationFailed | DispatchPhase::Completed | DispatchPhase::Failed
        )
    }
}

impl fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_phase(tool: &str, request_id: &RequestId, phase: DispatchPhase) {
    tracing::debug!(tool = %tool, request_id = %request_id, phase = %phase, "Dispatch phase");
}

// =============================================================================
// Execution outcome
// =============================================================================

/// Human-readable summary plus payload of a successful call.
#[derive(Debug)]
struct Success {
    message: String,
    data: Value,
}

/// Result of the Executing phase; `endpoint` is kept on both outcomes.
#[derive(Debug)]
struct Outcome {
    endpoint: Option<String>,
    result: Result<Success>,
}

impl Outcome {
    fn from_provider<T, F>(result: ProviderResult<T>, describe: F) -> Self
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        match result {
            Ok(fetched) => Self {
                endpoint: Some(fetched.endpoint),
                result: success(&fetched.value, describe),
            },
            Err(failure) => Self {
                endpoint: failure.endpoint,
                result: Err(failure.error),
            },
        }
    }

    fn from_static<T, F>(result: Result<T>, describe: F) -> Self
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        Self {
            endpoint: None,
            result: result.and_then(|value| success(&value, describe)),
        }
    }
}

fn success<T, F>(value: &T, describe: F) -> Result<Success>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    Ok(Success {
        message: describe(value),
        data: serde_json::to_value(value)?,
    })
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Routes tool calls to backends. Cheap to share behind `Arc`.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<ToolCatalog>,
    geocoder: Arc<dyn GeocodingBackend>,
    router: Arc<dyn RoutingBackend>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tools", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Build HTTP clients from `config` and register the standard tools.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_backends(
            ToolCatalog::standard(),
            Arc::new(NominatimClient::new(config)?),
            Arc::new(OsrmClient::new(config)?),
        ))
    }

    /// Dispatcher over caller-supplied backends.
    pub fn with_backends(
        catalog: ToolCatalog,
        geocoder: Arc<dyn GeocodingBackend>,
        router: Arc<dyn RoutingBackend>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            geocoder,
            router,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Invoke `tool_name` with JSON `args`.
    pub async fn dispatch(&self, tool_name: &str, args: Value) -> ToolResponse {
        self.dispatch_request(ToolRequest::new(tool_name, args)).await
    }

    /// Invoke one tool call. Always returns an envelope.
    pub async fn dispatch_request(&self, request: ToolRequest) -> ToolResponse {
        let request_id = request.request_id.unwrap_or_default();
        let tool = request.tool_name;
        log_phase(&tool, &request_id, DispatchPhase::Received);

        let invocation = match self.prepare(&tool, request.arguments) {
            Ok(invocation) => invocation,
            Err(err) => {
                log_phase(&tool, &request_id, DispatchPhase::ValidationFailed);
                tracing::warn!(tool = %tool, request_id = %request_id, error_code = %err.code(), "{}", err);
                return ToolResponse::from_error(&err);
            }
        };
        log_phase(&tool, &request_id, DispatchPhase::Validated);

        log_phase(&tool, &request_id, DispatchPhase::Executing);
        let started_at = Utc::now();
        let clock = Instant::now();
        let outcome = recovery::contain(self.execute(invocation), &tool)
            .await
            .unwrap_or_else(|err| Outcome {
                endpoint: None,
                result: Err(err),
            });
        let elapsed_ms = clock.elapsed().as_secs_f64() * 1000.0;
        let usage = ToolUsage::new(outcome.endpoint, elapsed_ms, started_at);

        match outcome.result {
            Ok(success) => {
                log_phase(&tool, &request_id, DispatchPhase::Completed);
                tracing::info!(tool = %tool, request_id = %request_id, elapsed_ms, "Tool call completed");
                ToolResponse::success(success.message, success.data).with_usage(usage)
            }
            Err(err) => {
                log_phase(&tool, &request_id, DispatchPhase::Failed);
                tracing::warn!(
                    tool = %tool,
                    request_id = %request_id,
                    error_code = %err.code(),
                    elapsed_ms,
                    "{}",
                    err
                );
                ToolResponse::from_error(&err).with_usage(usage)
            }
        }
    }

    /// Run several calls concurrently; responses keep request order.
    pub async fn dispatch_many(&self, requests: Vec<ToolRequest>) -> Vec<ToolResponse> {
        join_all(requests.into_iter().map(|r| self.dispatch_request(r))).await
    }

    fn prepare(&self, tool: &str, mut args: Value) -> Result<Invocation> {
        let entry = self.catalog.get_schema(tool)?;

        let errors = self.catalog.validate_params(tool, &args)?;
        if !errors.is_empty() {
            return Err(Error::invalid_input(errors.join("; ")));
        }
        self.catalog.fill_defaults(tool, &mut args)?;

        Invocation::parse(entry.kind, args)
    }

    async fn execute(&self, invocation: Invocation) -> Outcome {
        match invocation {
            Invocation::ForwardGeocode(req) => {
                let result = self.geocoder.forward_geocode(&req).await;
                Outcome::from_provider(result, |places| {
                    if places.is_empty() {
                        format!("No results found for '{}'", req.query)
                    } else {
                        format!("Found {} for '{}'", plural(places.len(), "result", "results"), req.query)
                    }
                })
            }
            Invocation::ReverseGeocode(point) => {
                let result = self.geocoder.reverse_geocode(point).await;
                Outcome::from_provider(result, |rev| format!("Address: {}", rev.label))
            }
            Invocation::PoiSearch(req) => {
                let result = self.geocoder.search_poi(&req).await;
                Outcome::from_provider(result, |found| {
                    format!(
                        "Found {} matching '{}' within {}m of {}",
                        plural(found.results.len(), "place", "places"),
                        found.query,
                        found.search_radius_meters,
                        found.center
                    )
                })
            }
            Invocation::Route(req) => {
                let result = self.router.route(&req).await;
                Outcome::from_provider(result, |route| {
                    format!(
                        "Route: {:.1} km, {:.1} min by {}",
                        route.distance_km, route.duration_minutes, route.profile
                    )
                })
            }
            Invocation::DistanceMatrix(req) => {
                let result = self.router.distance_matrix(&req).await;
                Outcome::from_provider(result, |matrix| {
                    if req.sources.is_none() && req.destinations.is_none() {
                        format!(
                            "Distance matrix for {} by {}",
                            plural(matrix.size, "point", "points"),
                            matrix.profile
                        )
                    } else {
                        format!(
                            "Distance matrix for {} and {} by {}",
                            plural(matrix.sources.len(), "source", "sources"),
                            plural(matrix.destinations.len(), "destination", "destinations"),
                            matrix.profile
                        )
                    }
                })
            }
            Invocation::MatchTrace(req) => {
                let result = self.router.match_trace(&req).await;
                Outcome::from_provider(result, |matched| {
                    format!(
                        "Matched {} of {} points (confidence {:.2})",
                        matched.matched_points, matched.total_points, matched.confidence
                    )
                })
            }
            Invocation::ListTileProviders => Outcome::from_static(Ok(tiles::summarize()), |list| {
                format!("Found {}", plural(list.count, "tile provider", "tile providers"))
            }),
            Invocation::GetTileProviderInfo(args) => {
                Outcome::from_static(tiles::get_provider(&args.provider_id), |p| {
                    format!("Provider information for {}", p.id)
                })
            }
            Invocation::GetTileAttribution(args) => {
                Outcome::from_static(tiles::attribution_for(&args.provider_id), |a| {
                    format!("Attribution for {}", a.provider_id)
                })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
