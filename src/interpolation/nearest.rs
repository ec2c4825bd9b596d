//! Nearest neighbor interpolation.
//!
//! This method selects the value of the nearest grid point. It gives
//! blocky output that shows the native grid resolution.

use super::Interpolator;
use crate::error::{CartoError, Result};
use crate::interpolation::common;

/// Nearest neighbor interpolator
pub struct NearestInterpolator;

impl Interpolator for NearestInterpolator {
    fn interpolate(&self, data: &[f32], shape: &[usize], indices: &[f64]) -> Result<f32> {
        // Validate the input dimensions
        if indices.len() != shape.len() {
            return Err(CartoError::Interpolation {
                message: format!(
                    "Dimension mismatch: indices has {} dimensions but shape has {} dimensions",
                    indices.len(),
                    shape.len()
                ),
            });
        }

        // Round each index to the nearest integer and clamp to valid range
        let nearest_indices: Vec<usize> = indices
            .iter()
            .zip(shape)
            .map(|(&index, &size)| common::clamp_index(index.round(), size) as usize)
            .collect();

        let flat_idx = common::flat_index(&nearest_indices, shape)?;

        data.get(flat_idx)
            .copied()
            .ok_or_else(|| CartoError::Interpolation {
                message: format!(
                    "Index out of bounds: calculated index {} exceeds data length {}",
                    flat_idx,
                    data.len()
                ),
            })
    }

    fn name(&self) -> &str {
        "nearest"
    }
}
