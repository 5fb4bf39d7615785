//! Haversine travel estimator.
//!
//! Uses great-circle distance and a fixed urban driving speed. Straight-line
//! distance understates road distance, so treat results as approximations.

use crate::model::{Coordinate, DistanceMatrix};
use crate::traits::{LegEstimate, TravelEstimator};

/// Average driving speed assumption (~50 km/h).
pub const AVG_SPEED_MPS: f64 = 13.8889;

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters.
pub fn haversine_m(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = lat2_rad - lat1_rad;
    let delta_lng = to.lng.to_radians() - from.lng.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Haversine-based travel estimator.
#[derive(Debug, Clone)]
pub struct HaversineEstimator {
    /// Assumed average driving speed in m/s.
    pub speed_mps: f64,
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        Self {
            speed_mps: AVG_SPEED_MPS,
        }
    }
}

impl HaversineEstimator {
    pub fn new(speed_mps: f64) -> Self {
        Self { speed_mps }
    }

    fn meters_to_seconds(&self, meters: f64) -> f64 {
        meters / self.speed_mps
    }

    /// Full pairwise matrix for `locations`, indexed in input order.
    pub fn matrix_for(&self, locations: &[Coordinate]) -> DistanceMatrix {
        let n = locations.len();
        let mut meters = vec![vec![0.0; n]; n];
        let mut seconds = vec![vec![0.0; n]; n];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i != j {
                    let leg = self.estimate(*from, *to);
                    meters[i][j] = leg.meters;
                    seconds[i][j] = leg.seconds;
                }
            }
        }

        DistanceMatrix { meters, seconds }
    }
}

impl TravelEstimator for HaversineEstimator {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> LegEstimate {
        let meters = haversine_m(from, to);
        LegEstimate {
            meters,
            seconds: self.meters_to_seconds(meters),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let point = Coordinate::new(36.1, -115.1);
        assert_eq!(haversine_m(point, point), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_on_equator() {
        // 2 * pi * 6371 km / 360
        let dist = haversine_m(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((dist - 111_194.93).abs() < 0.1, "got {}", dist);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, ~370 km
        let dist = haversine_m(Coordinate::new(36.17, -115.14), Coordinate::new(34.05, -118.24));
        assert!(dist > 350_000.0 && dist < 400_000.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let dist = haversine_m(Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 180.0));
        assert!(dist.is_finite());
        assert!((dist - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
    }

    #[test]
    fn test_duration_uses_speed() {
        let estimator = HaversineEstimator::default();
        // 13.8889 m/s for 1000 s
        assert!((estimator.meters_to_seconds(13_888.9) - 1000.0).abs() < 1e-9);

        let slow = HaversineEstimator::new(1.0);
        assert_eq!(slow.meters_to_seconds(42.0), 42.0);
    }

    #[test]
    fn test_matrix_diagonal_is_zero() {
        let estimator = HaversineEstimator::default();
        let locations = vec![
            Coordinate::new(36.1, -115.1),
            Coordinate::new(36.2, -115.2),
            Coordinate::new(36.3, -115.3),
        ];
        let matrix = estimator.matrix_for(&locations);

        for i in 0..locations.len() {
            assert_eq!(matrix.meters[i][i], 0.0, "Diagonal should be zero");
            assert_eq!(matrix.seconds[i][i], 0.0, "Diagonal should be zero");
        }
    }

    #[test]
    fn test_matrix_symmetric() {
        let estimator = HaversineEstimator::default();
        let locations = vec![Coordinate::new(36.1, -115.1), Coordinate::new(36.2, -115.2)];
        let matrix = estimator.matrix_for(&locations);

        assert_eq!(matrix.meters[0][1], matrix.meters[1][0], "Matrix should be symmetric");
    }
}
