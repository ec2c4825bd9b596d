//! Error types for cartocompare.
//!
//! A single error enum covers every failure the rendering pipeline can hit.
//! Nothing is recovered from: errors travel up to `main` and end the run.

use thiserror::Error;

/// The main error type for cartocompare operations.
#[derive(Error, Debug)]
pub enum CartoError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding errors
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Projection errors
    #[error("Projection error: {message}")]
    Projection { message: String },

    /// Interpolation errors
    #[error("Interpolation error: {message}")]
    Interpolation { message: String },

    /// Base-map data errors
    #[error("Geographic data error: {message}")]
    GeoData { message: String },

    /// A field does not match the grid it is drawn on
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Figure composition and rasterisation errors
    #[error("Render error: {message}")]
    Render { message: String },
}

/// Convenience type alias for Results with CartoError
pub type Result<T> = std::result::Result<T, CartoError>;
