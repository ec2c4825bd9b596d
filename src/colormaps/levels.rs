//! Discrete contour levels and the colour scale built on them.
//!
//! A filled contour does not shade continuously: the display range is cut
//! into equal bands and every value inside a band gets the band's colour.
//! Values outside the display range saturate into the first or last band.

use super::colormap::Colormap;
use crate::error::{CartoError, Result};

/// Equal-width bands over a fixed display range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourLevels {
    vmin: f32,
    vmax: f32,
    bands: usize,
}

impl ContourLevels {
    pub fn new(vmin: f32, vmax: f32, bands: usize) -> Result<Self> {
        if !(vmin.is_finite() && vmax.is_finite()) || vmax <= vmin {
            return Err(CartoError::InvalidParameter {
                param: "levels".to_string(),
                message: format!("Display range must be increasing, got [{}, {}]", vmin, vmax),
            });
        }
        if bands == 0 {
            return Err(CartoError::InvalidParameter {
                param: "levels".to_string(),
                message: "At least one contour band is required".to_string(),
            });
        }
        Ok(Self { vmin, vmax, bands })
    }

    pub fn vmin(&self) -> f32 {
        self.vmin
    }

    pub fn vmax(&self) -> f32 {
        self.vmax
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    /// The `bands + 1` band edges, from `vmin` to `vmax`
    pub fn boundaries(&self) -> Vec<f32> {
        let step = (self.vmax - self.vmin) / self.bands as f32;
        (0..=self.bands)
            .map(|i| {
                if i == self.bands {
                    self.vmax
                } else {
                    self.vmin + step * i as f32
                }
            })
            .collect()
    }

    /// Band holding `value` after clamping to the display range
    pub fn band_index(&self, value: f32) -> usize {
        let clamped = value.clamp(self.vmin, self.vmax);
        let position = (clamped - self.vmin) / (self.vmax - self.vmin) * self.bands as f32;
        (position.floor() as usize).min(self.bands - 1)
    }

    /// Normalized position of a band's midpoint
    pub fn band_center(&self, band: usize) -> f32 {
        (band as f32 + 0.5) / self.bands as f32
    }

    /// Whole numbers inside the display range, used as colourbar ticks
    pub fn integer_ticks(&self) -> Vec<f32> {
        let first = self.vmin.ceil() as i64;
        let last = self.vmax.floor() as i64;
        (first..=last).map(|t| t as f32).collect()
    }
}

/// A colormap resolved onto contour bands, with a layer opacity.
///
/// Both panels and the colourbar share one `ColorScale`, which is what makes
/// their colours comparable.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    colormap: String,
    levels: ContourLevels,
    colors: Vec<[u8; 4]>,
    alpha: f32,
}

impl ColorScale {
    pub fn new(colormap: &dyn Colormap, levels: ContourLevels, alpha: f32) -> Self {
        let colors = (0..levels.bands())
            .map(|band| colormap.map_normalized(levels.band_center(band)))
            .collect();

        Self {
            colormap: colormap.name().to_string(),
            levels,
            colors,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn levels(&self) -> &ContourLevels {
        &self.levels
    }

    pub fn colormap_name(&self) -> &str {
        &self.colormap
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Opaque colour of each band, lowest first
    pub fn band_colors(&self) -> &[[u8; 4]] {
        &self.colors
    }

    /// Colour of a value including the layer opacity; NaN is transparent
    pub fn color_for(&self, value: f32) -> [u8; 4] {
        if value.is_nan() {
            return [0, 0, 0, 0];
        }
        let [r, g, b, a] = self.colors[self.levels.band_index(value)];
        [r, g, b, (a as f32 * self.alpha).round() as u8]
    }
}
