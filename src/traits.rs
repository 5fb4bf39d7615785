//! Core seams for route construction.
//!
//! Kept small: an estimator for pairwise travel, a way to read a position off
//! anything routable, and a strategy that turns stops into a route.

use crate::model::{Coordinate, RouteResult, Stop};

/// Unrounded travel estimate for a single pair of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegEstimate {
    pub meters: f64,
    pub seconds: f64,
}

/// Anything with a fixed position.
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

/// Estimates distance and travel time between two positions.
///
/// Implementations must be pure: the same pair always yields the same
/// estimate, and a point to itself is zero.
pub trait TravelEstimator {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> LegEstimate;
}

/// Builds an ordered route from an origin and an unordered stop set.
pub trait RouteStrategy {
    /// Short identifier reported in diagnostics.
    fn name(&self) -> &'static str;

    fn construct<E: TravelEstimator>(
        &self,
        origin: Coordinate,
        stops: &[Stop],
        estimator: &E,
    ) -> RouteResult;
}
