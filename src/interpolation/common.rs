//! Common utilities for interpolation algorithms.

use crate::error::{CartoError, Result};

/// Map a coordinate value to a fractional index into ascending coordinates.
///
/// Values outside the coordinate range are clamped to the first or last
/// index.
pub fn coord_to_index(coord: f64, coord_values: &[f64]) -> Result<f64> {
    if coord_values.is_empty() {
        return Err(CartoError::Interpolation {
            message: "Cannot map a coordinate onto an empty axis".to_string(),
        });
    }
    if !coord.is_finite() {
        return Err(CartoError::Interpolation {
            message: format!("Coordinate is not finite: {}", coord),
        });
    }

    let last = coord_values.len() - 1;
    if last == 0 || coord <= coord_values[0] {
        return Ok(0.0);
    }
    if coord >= coord_values[last] {
        return Ok(last as f64);
    }

    // First index whose value is greater than the coordinate
    let upper = coord_values.partition_point(|&v| v <= coord);
    let lower = upper - 1;
    let span = coord_values[upper] - coord_values[lower];
    let fraction = if span > 0.0 {
        (coord - coord_values[lower]) / span
    } else {
        0.0
    };

    Ok(lower as f64 + fraction)
}

/// Clamp an index to valid bounds
pub fn clamp_index(index: f64, size: usize) -> f64 {
    index.max(0.0).min((size - 1) as f64)
}

/// Get the weight for linear interpolation
pub fn linear_weight(fraction: f64) -> (f64, f64) {
    (1.0 - fraction, fraction)
}

/// Row-major flat index of a multi-dimensional index
pub fn flat_index(indices: &[usize], shape: &[usize]) -> Result<usize> {
    if indices.len() != shape.len() {
        return Err(CartoError::Interpolation {
            message: format!(
                "Dimension mismatch: indices has {} dimensions but shape has {} dimensions",
                indices.len(),
                shape.len()
            ),
        });
    }

    let mut flat = 0;
    for (&index, &size) in indices.iter().zip(shape) {
        if index >= size {
            return Err(CartoError::Interpolation {
                message: format!("Index {} out of bounds for axis of size {}", index, size),
            });
        }
        flat = flat * size + index;
    }
    Ok(flat)
}
