//! Colormap trait and utilities.
//!
//! This module defines the common interface for all colormaps.

use crate::error::{CartoError, Result};

/// Trait for color mapping implementations
pub trait Colormap {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f32) -> [u8; 4];

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f32, min: f32, max: f32) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// A colormap backed by a `colorgrad` gradient, optionally reversed
pub struct GradientColormap {
    name: &'static str,
    gradient: colorgrad::Gradient,
    reversed: bool,
}

impl GradientColormap {
    pub fn new(name: &'static str, gradient: colorgrad::Gradient, reversed: bool) -> Self {
        Self {
            name,
            gradient,
            reversed,
        }
    }
}

impl Colormap for GradientColormap {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let t = if value.is_nan() {
            0.5
        } else {
            value.clamp(0.0, 1.0) as f64
        };
        let t = if self.reversed { 1.0 - t } else { t };
        self.gradient.at(t).to_rgba8()
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    use super::{diverging::*, sequential::*};

    match name.to_lowercase().as_str() {
        "rdylbu_r" => Ok(Box::new(rd_yl_bu_r())),
        "rdbu_r" => Ok(Box::new(rd_bu_r())),
        "spectral_r" => Ok(Box::new(spectral_r())),
        "viridis" => Ok(Box::new(viridis())),
        "plasma" => Ok(Box::new(plasma())),
        "inferno" => Ok(Box::new(inferno())),
        "magma" => Ok(Box::new(magma())),
        "cividis" => Ok(Box::new(cividis())),
        _ => Err(CartoError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Unknown colormap: {}", name),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_colormap() {
        assert_eq!(get_colormap("rdylbu_r").unwrap().name(), "rdylbu_r");
        assert_eq!(get_colormap("RdBu_r").unwrap().name(), "rdbu_r");
        assert_eq!(get_colormap("viridis").unwrap().name(), "viridis");
        assert!(get_colormap("jet").is_err());
    }

    #[test]
    fn test_map_uses_range() {
        let colormap = get_colormap("rdylbu_r").unwrap();
        assert_eq!(colormap.map(0.0, 0.0, 5.0), colormap.map_normalized(0.0));
        assert_eq!(colormap.map(5.0, 0.0, 5.0), colormap.map_normalized(1.0));
        assert_eq!(colormap.map(-3.0, 0.0, 5.0), colormap.map_normalized(0.0));
        assert_eq!(colormap.map(1.0, 2.0, 2.0), colormap.map_normalized(0.5));
    }
}
