//! Wire data model for the optimize endpoint.
//!
//! Field names mirror the JSON contract exactly. Distances and durations
//! reported to callers are whole meters/seconds; coordinates stay floating
//! point.

use serde::{Deserialize, Serialize};

use crate::traits::Located;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

/// A destination supplied by the caller.
///
/// Identity is the `id`; stops sharing an id are still routed as separate
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl Stop {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            label: None,
            lat,
            lng,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Located for Stop {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Caller-supplied distance/duration grids.
///
/// Accepted and structurally validated, but route construction always uses
/// geodesic estimates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    #[serde(default)]
    pub meters: Vec<Vec<f64>>,
    #[serde(default)]
    pub seconds: Vec<Vec<f64>>,
}

/// Solver strategy tag. Only affects reported diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Fast,
    #[default]
    Quality,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Fast => "fast",
            Strategy::Quality => "quality",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerOptions {
    pub strategy: Strategy,
    pub max_iterations: u32,
    pub max_runtime_seconds: u32,
    pub fallback_tolerance: f64,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Quality,
            max_iterations: 4000,
            max_runtime_seconds: 30,
            fallback_tolerance: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub origin: Coordinate,
    pub destinations: Vec<Stop>,
    #[serde(default)]
    pub distance_matrix: Option<DistanceMatrix>,
    #[serde(default)]
    pub options: OptimizerOptions,
}

impl OptimizeRequest {
    pub fn new(origin: Coordinate, destinations: Vec<Stop>) -> Self {
        Self {
            origin,
            destinations,
            distance_matrix: None,
            options: OptimizerOptions::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.options.strategy = strategy;
        self
    }
}

/// One visited stop with leg and running totals, all rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedStop {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub lat: f64,
    pub lng: f64,
    /// 1-based position in the visiting order.
    pub sequence: u32,
    pub distance_from_previous_m: u64,
    pub duration_from_previous_s: u64,
    pub cumulative_distance_m: u64,
    pub cumulative_duration_s: u64,
}

/// Output of route construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub visit_order: Vec<String>,
    pub ordered_stops: Vec<OrderedStop>,
    pub total_distance_m: u64,
    pub total_duration_s: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub strategy: Strategy,
    pub solver: String,
    pub iterations: u64,
    pub gap: f64,
    pub fallback_used: bool,
    pub execution_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub route_id: String,
    pub visit_order: Vec<String>,
    pub ordered_stops: Vec<OrderedStop>,
    pub total_distance_m: u64,
    pub total_duration_s: u64,
    pub diagnostics: Diagnostics,
}

impl OptimizeResponse {
    pub fn from_route(route_id: String, route: RouteResult, diagnostics: Diagnostics) -> Self {
        Self {
            route_id,
            visit_order: route.visit_order,
            ordered_stops: route.ordered_stops,
            total_distance_m: route.total_distance_m,
            total_duration_s: route.total_duration_s,
            diagnostics,
        }
    }
}

/// Body of the liveness endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
