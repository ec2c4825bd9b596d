//! cartocompare - compare map projections on a synthetic climate field
//!
//! This is the main entry point for the cartocompare application.

use std::time::Instant;
use tracing::{error, info};

use cartocompare::{
    generate_run_id, init_tracing, log_error, log_operation_end, log_operation_start, report, run,
    run_span, Config, Result,
};

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    init_tracing(&config.log_level);
    let _run = run_span(&generate_run_id()).entered();

    info!("Starting cartocompare v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut stdout = std::io::stdout();
    report::write_notice(&mut stdout)?;

    let start = Instant::now();
    let output = config.render.output.display().to_string();
    log_operation_start("comparison", Some(output.as_str()));

    let summary = run(&config).map_err(|e| {
        log_error(&e, "rendering projection comparison");
        log_operation_end("comparison", start, false);
        e
    })?;
    log_operation_end("comparison", start, true);

    info!(
        output = %summary.output.display(),
        width = summary.width,
        height = summary.height,
        "Comparison written"
    );

    report::write_summary(&mut stdout)?;
    Ok(())
}
