//! Colormap implementations for image generation.
//!
//! This module provides matplotlib-inspired colormaps and the discrete
//! colour scale shared by filled contours and the colourbar.

pub mod colormap;
pub mod diverging;
pub mod levels;
pub mod sequential;

pub use colormap::{get_colormap, Colormap, GradientColormap};
pub use levels::{ColorScale, ContourLevels};
