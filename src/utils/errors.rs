//! Error handling for BowlBot
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Main error type for BowlBot application
#[derive(Error, Debug)]
pub enum BowlBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Group {group_id} already has an event scheduled for {scheduled_at}")]
    EventAlreadyScheduled { group_id: i64, scheduled_at: DateTime<Utc> },

    #[error("Group {group_id} is not configured")]
    GroupNotConfigured { group_id: i64 },

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for BowlBot operations
pub type Result<T> = std::result::Result<T, BowlBotError>;

impl BowlBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            BowlBotError::Database(_) => false,
            BowlBotError::Migration(_) => false,
            BowlBotError::Telegram(_) => true,
            BowlBotError::Config(_) => false,
            BowlBotError::EventNotFound { .. } => false,
            BowlBotError::EventAlreadyScheduled { .. } => true,
            BowlBotError::GroupNotConfigured { .. } => true,
            BowlBotError::UrlParse(_) => false,
            BowlBotError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BowlBotError::Database(_) => ErrorSeverity::Critical,
            BowlBotError::Migration(_) => ErrorSeverity::Critical,
            BowlBotError::Config(_) => ErrorSeverity::Critical,
            BowlBotError::Telegram(_) => ErrorSeverity::Warning,
            BowlBotError::EventAlreadyScheduled { .. } => ErrorSeverity::Info,
            BowlBotError::GroupNotConfigured { .. } => ErrorSeverity::Info,
            BowlBotError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
