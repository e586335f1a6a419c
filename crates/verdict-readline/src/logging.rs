//! File logging for the REPL.
//!
//! Log lines go to a daily-rotated file so they never interleave with the
//! interactive output. The filter is read from `VERDICT_LOG`.

use std::path::Path;

use anyhow::{Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILTER_ENV: &str = "VERDICT_LOG";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init(logs_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;

    let appender = tracing_appender::rolling::daily(logs_dir, "verdict.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;

    Ok(guard)
}
