//! Interpolation algorithms for gridded data.
//!
//! The renderer samples the anomaly field once per output pixel, at
//! fractional grid indices obtained from the pixel's longitude/latitude.

pub mod bilinear;
pub mod common;
pub mod nearest;

use crate::error::{CartoError, Result};

/// Trait for interpolation methods
pub trait Interpolator {
    /// Interpolate a value at the given fractional indices
    fn interpolate(&self, data: &[f32], shape: &[usize], indices: &[f64]) -> Result<f32>;

    /// Get the name of this interpolation method
    fn name(&self) -> &str;
}

/// Get an interpolator by name
pub fn get_interpolator(name: &str) -> Result<Box<dyn Interpolator>> {
    match name.to_lowercase().as_str() {
        "nearest" => Ok(Box::new(nearest::NearestInterpolator)),
        "bilinear" => Ok(Box::new(bilinear::BilinearInterpolator)),
        _ => Err(CartoError::InvalidParameter {
            param: "interpolation".to_string(),
            message: format!("Unknown interpolation method: {}", name),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_interpolator() {
        assert_eq!(get_interpolator("nearest").unwrap().name(), "nearest");
        assert_eq!(get_interpolator("Bilinear").unwrap().name(), "bilinear");
        assert!(get_interpolator("bicubic").is_err());
    }
}
