//! Bilinear interpolation.
//!
//! This method performs linear interpolation in two dimensions using
//! the four nearest grid points.

use super::common::{clamp_index, linear_weight};
use super::Interpolator;
use crate::error::{CartoError, Result};

/// Bilinear interpolator
pub struct BilinearInterpolator;

impl Interpolator for BilinearInterpolator {
    fn interpolate(&self, data: &[f32], shape: &[usize], indices: &[f64]) -> Result<f32> {
        if shape.len() != 2 || indices.len() != 2 {
            return Err(CartoError::Interpolation {
                message: format!(
                    "Bilinear interpolation needs 2 dimensions, got shape {:?} and indices {:?}",
                    shape, indices
                ),
            });
        }

        let (rows, cols) = (shape[0], shape[1]);
        if rows == 0 || cols == 0 || data.len() != rows * cols {
            return Err(CartoError::Interpolation {
                message: format!(
                    "Data length {} does not match shape {:?}",
                    data.len(),
                    shape
                ),
            });
        }

        let y = clamp_index(indices[0], rows);
        let x = clamp_index(indices[1], cols);

        let y0 = y.floor() as usize;
        let x0 = x.floor() as usize;
        let y1 = (y0 + 1).min(rows - 1);
        let x1 = (x0 + 1).min(cols - 1);

        let (wy0, wy1) = linear_weight(y - y0 as f64);
        let (wx0, wx1) = linear_weight(x - x0 as f64);

        let at = |r: usize, c: usize| data[r * cols + c] as f64;

        let top = at(y0, x0) * wx0 + at(y0, x1) * wx1;
        let bottom = at(y1, x0) * wx0 + at(y1, x1) * wx1;

        Ok((top * wy0 + bottom * wy1) as f32)
    }

    fn name(&self) -> &str {
        "bilinear"
    }
}
