//! Sequential colormaps (single-hue progression).
//!
//! These colormaps are suitable for data that progresses from low to high.

use super::colormap::GradientColormap;

/// Viridis colormap - perceptually uniform, colorblind-friendly
pub fn viridis() -> GradientColormap {
    GradientColormap::new("viridis", colorgrad::viridis(), false)
}

pub fn plasma() -> GradientColormap {
    GradientColormap::new("plasma", colorgrad::plasma(), false)
}

pub fn inferno() -> GradientColormap {
    GradientColormap::new("inferno", colorgrad::inferno(), false)
}

pub fn magma() -> GradientColormap {
    GradientColormap::new("magma", colorgrad::magma(), false)
}

/// Cividis colormap - colorblind-friendly alternative to viridis
pub fn cividis() -> GradientColormap {
    GradientColormap::new("cividis", colorgrad::cividis(), false)
}
