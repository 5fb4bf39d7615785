//! Route construction (greedy nearest neighbor) and request orchestration.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};
use uuid::Uuid;

use crate::haversine::HaversineEstimator;
use crate::model::{
    Coordinate, Diagnostics, HealthStatus, OptimizeRequest, OptimizeResponse, OrderedStop,
    RouteResult, Stop, Strategy,
};
use crate::traits::{LegEstimate, Located, RouteStrategy, TravelEstimator};
use crate::validation::{validate_request, ValidationError};

/// Solver label reported in diagnostics.
pub const SOLVER_LABEL: &str = "nearest_neighbor_stub";

/// Always visit the closest remaining stop next.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor;

impl RouteStrategy for NearestNeighbor {
    fn name(&self) -> &'static str {
        SOLVER_LABEL
    }

    fn construct<E: TravelEstimator>(
        &self,
        origin: Coordinate,
        stops: &[Stop],
        estimator: &E,
    ) -> RouteResult {
        nearest_neighbor(origin, stops, estimator)
    }
}

/// Strategy used for a given tag.
///
/// Both tags build the same route; they differ only in reported diagnostics.
/// A local-search strategy would plug in here for `Quality`.
pub fn strategy_for(strategy: Strategy) -> NearestNeighbor {
    match strategy {
        Strategy::Fast | Strategy::Quality => NearestNeighbor,
    }
}

/// Order `stops` starting from `origin`, always moving to the nearest
/// unvisited stop.
///
/// Ties go to the stop that comes first in the remaining set, which keeps
/// caller order. Leg and cumulative figures are rounded where they are
/// recorded; running totals stay unrounded.
///
/// # Panics
///
/// Panics if `stops` is empty. Validation rejects such requests upstream.
pub fn nearest_neighbor<E: TravelEstimator>(
    origin: Coordinate,
    stops: &[Stop],
    estimator: &E,
) -> RouteResult {
    assert!(!stops.is_empty(), "route construction requires at least one stop");

    let mut remaining: Vec<&Stop> = stops.iter().collect();
    let mut visit_order = Vec::with_capacity(stops.len());
    let mut ordered_stops = Vec::with_capacity(stops.len());
    let mut current = origin;
    let mut total_distance = 0.0;
    let mut total_duration = 0.0;
    let mut sequence = 1;

    while !remaining.is_empty() {
        let (best_idx, leg) = nearest(current, &remaining, estimator);
        let stop = remaining.remove(best_idx);

        total_distance += leg.meters;
        total_duration += leg.seconds;

        debug!(
            stop_id = %stop.id,
            sequence,
            leg_m = leg.meters,
            remaining = remaining.len(),
            "selected nearest stop"
        );

        ordered_stops.push(OrderedStop {
            id: stop.id.clone(),
            label: stop.label.clone(),
            lat: stop.lat,
            lng: stop.lng,
            sequence,
            distance_from_previous_m: to_whole(leg.meters),
            duration_from_previous_s: to_whole(leg.seconds),
            cumulative_distance_m: to_whole(total_distance),
            cumulative_duration_s: to_whole(total_duration),
        });
        visit_order.push(stop.id.clone());

        current = stop.coordinate();
        sequence += 1;
    }

    RouteResult {
        visit_order,
        ordered_stops,
        total_distance_m: to_whole(total_distance),
        total_duration_s: to_whole(total_duration),
    }
}

/// Index of the closest candidate and the leg to it. First strict minimum wins.
fn nearest<E: TravelEstimator>(
    current: Coordinate,
    candidates: &[&Stop],
    estimator: &E,
) -> (usize, LegEstimate) {
    let mut best_idx = 0;
    let mut best_leg = estimator.estimate(current, candidates[0].coordinate());

    for (idx, candidate) in candidates.iter().enumerate().skip(1) {
        let leg = estimator.estimate(current, candidate.coordinate());
        if leg.meters < best_leg.meters {
            best_idx = idx;
            best_leg = leg;
        }
    }

    (best_idx, best_leg)
}

/// Round half to even.
fn to_whole(value: f64) -> u64 {
    value.round_ties_even().max(0.0) as u64
}

/// Placeholder diagnostics derived from stop count and strategy.
///
/// Nothing here is measured except `execution_ms`.
pub fn synthetic_diagnostics(strategy: Strategy, stop_count: usize, execution_ms: u64) -> Diagnostics {
    let per_stop = match strategy {
        Strategy::Quality => 200,
        Strategy::Fast => 100,
    };
    let gap = match strategy {
        Strategy::Quality => 0.01,
        Strategy::Fast => 0.05,
    };

    Diagnostics {
        strategy,
        solver: SOLVER_LABEL.to_string(),
        iterations: (stop_count as u64 * per_stop).max(1),
        gap,
        fallback_used: false,
        execution_ms,
    }
}

/// Validate and optimize a request using the default haversine estimator.
pub fn optimize(request: &OptimizeRequest) -> Result<OptimizeResponse, ValidationError> {
    optimize_with(request, &HaversineEstimator::default())
}

/// Validate and optimize a request with a caller-chosen estimator.
///
/// Any supplied distance matrix is checked for shape but not consulted.
pub fn optimize_with<E: TravelEstimator>(
    request: &OptimizeRequest,
    estimator: &E,
) -> Result<OptimizeResponse, ValidationError> {
    validate_request(request)?;

    let strategy = request.options.strategy;
    let start = Instant::now();
    let route = strategy_for(strategy).construct(request.origin, &request.destinations, estimator);
    let execution_ms = (start.elapsed().as_millis() as u64).max(1);

    let diagnostics = synthetic_diagnostics(strategy, route.visit_order.len(), execution_ms);
    let route_id = Uuid::new_v4().to_string();

    info!(
        route_id = %route_id,
        strategy = strategy.as_str(),
        stops = route.visit_order.len(),
        total_distance_m = route.total_distance_m,
        total_duration_s = route.total_duration_s,
        execution_ms,
        "route optimized"
    );

    Ok(OptimizeResponse::from_route(route_id, route, diagnostics))
}

/// Optimize independent requests in parallel. Results keep input order.
pub fn optimize_batch(
    requests: &[OptimizeRequest],
) -> Vec<Result<OptimizeResponse, ValidationError>> {
    requests.par_iter().map(optimize).collect()
}

/// Liveness probe body.
pub fn health() -> HealthStatus {
    HealthStatus::ok()
}
