//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the BowlBot application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use uuid::Uuid;
use crate::config::LoggingConfig;
use crate::utils::errors::{BowlBotError, ErrorSeverity, Result};

/// Initialize logging based on configuration.
///
/// When a log directory is configured the returned guard must be held for
/// as long as the process runs, otherwise buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| BowlBotError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let (file_layer, guard) = match config.directory {
        Some(ref directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "bowlbot.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| BowlBotError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log group configuration and lifecycle events
pub fn log_group_event(group_id: i64, event: &str, user_id: Option<i64>, details: Option<&str>) {
    info!(
        group_id = group_id,
        event = event,
        user_id = user_id,
        details = details,
        "Group event occurred"
    );
}

/// Log roster and proposal actions
pub fn log_event_action(event_id: Uuid, action: &str, user_id: i64, details: Option<&str>) {
    info!(
        event_id = %event_id,
        action = action,
        user_id = user_id,
        details = details,
        "Event action performed"
    );
}

/// Log a failed handler at a level matching the error severity
pub fn log_handler_error(err: &BowlBotError, chat_id: i64, context: &str) {
    match err.severity() {
        ErrorSeverity::Info => debug!(chat_id = chat_id, context = context, error = %err, "Handler declined request"),
        ErrorSeverity::Warning => warn!(chat_id = chat_id, context = context, error = %err, "Handler failed"),
        ErrorSeverity::Error | ErrorSeverity::Critical => error!(
            chat_id = chat_id,
            context = context,
            error = %err,
            severity = %err.severity(),
            recoverable = err.is_recoverable(),
            "Handler failed"
        ),
    }
}
