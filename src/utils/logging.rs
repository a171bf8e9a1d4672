//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the FestBuddy application.

use crate::config::LoggingConfig;
use crate::utils::errors::{FestBuddyError, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging based on configuration
///
/// Returns the file appender guard when file logging is enabled; the caller
/// must keep it alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| FestBuddyError::Config(format!("invalid log level '{}': {}", config.level, e)))?;

    let (file_layer, guard) = match &config.file_path {
        Some(path) => {
            let appender = tracing_appender::rolling::daily(path, "festbuddy.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
            .init();
    }

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}
