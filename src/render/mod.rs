//! Raster map rendering.
//!
//! A [`Figure`] holds map [`Panel`]s stacked top to bottom. Panels carry
//! ordered [`Layer`]s whose coordinates are reprojected onto the panel's
//! projection while drawing. The figure lays everything out, adds an optional
//! shared [`Colorbar`], and exports PNG.

pub mod canvas;
pub mod figure;
pub mod legend;
pub mod panel;
pub mod text;

pub use canvas::{Canvas, Color, PixelRect};
pub use figure::{Figure, FigureLayout, LayoutMode, PanelHandle, SaveOptions};
pub use legend::{Colorbar, ColorbarConfig};
pub use panel::{
    ContourLayer, Gridlines, LabelSides, Layer, LineStyle, MapFrame, Marker, Panel, TextBox,
    TextLabel,
};
pub use text::{HAlign, TextStyle, VAlign};
