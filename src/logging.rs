//! Logging utilities for cartocompare.
//!
//! Diagnostics are structured `tracing` events written to stderr, so the
//! console report printed on stdout stays clean. Every event of a run is
//! recorded inside a `run` span carrying a unique run id.

use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Span};
use uuid::Uuid;

use crate::error::CartoError;

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(log_level: &str) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());

    // Already installed (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Span grouping every event of one comparison run
pub fn run_span(run_id: &str) -> Span {
    info_span!("run", run_id = %run_id)
}

/// Record the start of a pipeline stage, optionally naming the file it targets
pub fn log_operation_start(stage: &str, file: Option<&str>) {
    match file {
        Some(file) => info!(stage, file, "Stage started"),
        None => info!(stage, "Stage started"),
    }
}

/// Record the end of a pipeline stage with its wall-clock duration
pub fn log_operation_end(stage: &str, start_time: Instant, success: bool) {
    let elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(stage, elapsed_ms, "Stage finished");
    } else {
        warn!(stage, elapsed_ms, "Stage failed");
    }
}

/// Run `f` as a named stage, logging its duration at debug level
pub fn log_timed_operation<F, R>(stage: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    debug!(stage, elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "Stage timed");
    result
}

/// Log a failed run with the step it failed in
pub fn log_error(error: &CartoError, context: &str) {
    let kind = match error {
        CartoError::Io(_) => "io",
        CartoError::Png(_) => "png",
        CartoError::Json(_) => "json",
        CartoError::Config { .. } => "config",
        CartoError::InvalidParameter { .. } => "parameter",
        CartoError::Projection { .. } => "projection",
        CartoError::Interpolation { .. } => "interpolation",
        CartoError::GeoData { .. } => "geodata",
        CartoError::ShapeMismatch { .. } => "shape",
        CartoError::Render { .. } => "render",
    };
    error!(error = %error, kind, context, "Comparison failed");
}

/// Generate a unique run id
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}
