//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;
use crate::dirs;

/// Install logging to stderr, and to `bout.log` when file logging is enabled.
///
/// The returned guard flushes the file writer on drop; hold it for the
/// lifetime of the process.
pub fn setup_logging(config: &ClientConfig, log_file: bool) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = if log_file || config.log_to_file {
        let log_dir = config.log_dir.clone().unwrap_or_else(dirs::log_dir);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let file_appender = tracing_appender::rolling::never(&log_dir, "bout.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_file)
            .with_ansi(false);
        (Some((layer, log_dir)), Some(guard))
    } else {
        (None, None)
    };

    let log_path = file_layer.as_ref().map(|(_, dir)| dir.join("bout.log"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer.map(|(layer, _)| layer))
        .init();

    if let Some(path) = log_path {
        tracing::debug!("Log file: {}", path.display());
    }

    Ok(guard)
}
