//! Request validation.
//!
//! Everything route construction assumes about its input is checked here, so
//! the solver itself never has to fail.

use thiserror::Error;

use crate::model::{Coordinate, DistanceMatrix, OptimizeRequest, OptimizerOptions};

pub const MIN_DESTINATIONS: usize = 1;
pub const MAX_DESTINATIONS: usize = 30;

pub const MAX_ITERATIONS_RANGE: (u32, u32) = (10, 10_000);
pub const MAX_RUNTIME_SECONDS_RANGE: (u32, u32) = (1, 60);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: latitude {value} outside [-90, 90]")]
    Latitude { field: String, value: f64 },

    #[error("{field}: longitude {value} outside [-180, 180]")]
    Longitude { field: String, value: f64 },

    #[error("destinations: expected 1..=30 stops, got {0}")]
    DestinationCount(usize),

    #[error("destinations[{0}].id must not be empty")]
    EmptyStopId(usize),

    #[error("options.{field}: {value} outside [{min}, {max}]")]
    OptionOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("distance_matrix: meters and seconds matrices must have the same dimension")]
    MatrixDimension,

    #[error("distance_matrix: meters and seconds rows must align (row {0})")]
    MatrixRow(usize),
}

/// Checks a request before it reaches route construction.
pub fn validate_request(request: &OptimizeRequest) -> Result<(), ValidationError> {
    validate_coordinate("origin", request.origin)?;

    let count = request.destinations.len();
    if !(MIN_DESTINATIONS..=MAX_DESTINATIONS).contains(&count) {
        return Err(ValidationError::DestinationCount(count));
    }

    for (index, stop) in request.destinations.iter().enumerate() {
        validate_coordinate(
            &format!("destinations[{}]", index),
            Coordinate::new(stop.lat, stop.lng),
        )?;
        if stop.id.is_empty() {
            return Err(ValidationError::EmptyStopId(index));
        }
    }

    validate_options(&request.options)?;

    if let Some(matrix) = &request.distance_matrix {
        validate_matrix(matrix)?;
    }

    Ok(())
}

fn validate_coordinate(field: &str, coordinate: Coordinate) -> Result<(), ValidationError> {
    // NaN fails both range checks.
    if !(-90.0..=90.0).contains(&coordinate.lat) {
        return Err(ValidationError::Latitude {
            field: field.to_string(),
            value: coordinate.lat,
        });
    }
    if !(-180.0..=180.0).contains(&coordinate.lng) {
        return Err(ValidationError::Longitude {
            field: field.to_string(),
            value: coordinate.lng,
        });
    }
    Ok(())
}

fn validate_options(options: &OptimizerOptions) -> Result<(), ValidationError> {
    check_range(
        "max_iterations",
        f64::from(options.max_iterations),
        MAX_ITERATIONS_RANGE,
    )?;
    check_range(
        "max_runtime_seconds",
        f64::from(options.max_runtime_seconds),
        MAX_RUNTIME_SECONDS_RANGE,
    )?;
    if !(0.0..=1.0).contains(&options.fallback_tolerance) {
        return Err(ValidationError::OptionOutOfRange {
            field: "fallback_tolerance",
            value: options.fallback_tolerance,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}

fn check_range(field: &'static str, value: f64, (min, max): (u32, u32)) -> Result<(), ValidationError> {
    let (min, max) = (f64::from(min), f64::from(max));
    if value < min || value > max {
        return Err(ValidationError::OptionOutOfRange { field, value, min, max });
    }
    Ok(())
}

/// Structural check only: the grids must line up row for row.
fn validate_matrix(matrix: &DistanceMatrix) -> Result<(), ValidationError> {
    if matrix.meters.len() != matrix.seconds.len() {
        return Err(ValidationError::MatrixDimension);
    }
    for (index, (meters, seconds)) in matrix.meters.iter().zip(&matrix.seconds).enumerate() {
        if meters.len() != seconds.len() {
            return Err(ValidationError::MatrixRow(index));
        }
    }
    Ok(())
}
