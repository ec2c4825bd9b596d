//! Diverging colormaps (two-hue progression with center).
//!
//! These colormaps are suitable for anomalies. The `_r` variants run from
//! blue (low) to red (high), the usual convention for temperature.

use super::colormap::GradientColormap;

/// RdYlBu reversed: blue through pale yellow to red
pub fn rd_yl_bu_r() -> GradientColormap {
    GradientColormap::new("rdylbu_r", colorgrad::rd_yl_bu(), true)
}

/// RdBu reversed: blue through white to red
pub fn rd_bu_r() -> GradientColormap {
    GradientColormap::new("rdbu_r", colorgrad::rd_bu(), true)
}

/// Spectral reversed: blue through yellow to red
pub fn spectral_r() -> GradientColormap {
    GradientColormap::new("spectral_r", colorgrad::spectral(), true)
}
