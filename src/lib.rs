//! # cartocompare
//!
//! Side-by-side rendering of a synthetic temperature-anomaly field under two
//! map projections.
//!
//! The same global field is drawn on an equirectangular (PlateCarree) map and
//! on a Robinson map, with identical base layers, colour scale and reference
//! markers, so the distortion each projection introduces at high latitudes
//! can be compared directly.
//!
//! ## Architecture
//!
//! - **Data**: a synthetic lon/lat grid and anomaly field ([`grid`])
//! - **Geometry**: projections ([`projection`]) and base-map vectors ([`geodata`])
//! - **Rendering**: colour scales, interpolation and the raster figure engine
//!   ([`colormaps`], [`interpolation`], [`render`])
//! - **Pipeline**: the composed comparison and its console report
//!   ([`comparison`], [`annotation`], [`report`])

pub mod annotation;
pub mod colormaps;
pub mod comparison;
pub mod config;
pub mod error;
pub mod geodata;
pub mod grid;
pub mod interpolation;
pub mod logging;
pub mod projection;
pub mod render;
pub mod report;

pub use comparison::{compose_figure, run, Comparison, RunSummary};
pub use config::Config;
pub use error::{CartoError, Result};
pub use grid::{AnomalyField, Grid};
pub use logging::{
    generate_run_id, init_tracing, log_error, log_operation_end, log_operation_start,
    log_timed_operation, run_span,
};
pub use projection::MapProjection;
