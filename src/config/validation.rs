//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::net::SocketAddr;
use crate::utils::errors::{BowlBotError, Result};
use super::Settings;

/// Largest UTC offset in use anywhere (UTC+14)
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_conversation_config(&settings.conversation)?;
    validate_events_config(&settings.events)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(BowlBotError::Config(
            "Bot token is required".to_string()
        ));
    }

    if let Some(ref webhook_url) = config.webhook_url {
        url::Url::parse(webhook_url)?;

        config.listen_addr.parse::<SocketAddr>().map_err(|e| {
            BowlBotError::Config(format!("Invalid listen address {}: {}", config.listen_addr, e))
        })?;
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BowlBotError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.is_memory() {
        return Ok(());
    }

    if config.max_connections == 0 {
        return Err(BowlBotError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(BowlBotError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate setup dialog timings
fn validate_conversation_config(config: &super::ConversationConfig) -> Result<()> {
    if config.ttl_seconds == 0 {
        return Err(BowlBotError::Config(
            "Conversation TTL must be greater than 0".to_string()
        ));
    }

    if config.sweep_interval_seconds == 0 {
        return Err(BowlBotError::Config(
            "Conversation sweep interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate event scheduling configuration
fn validate_events_config(config: &super::EventsConfig) -> Result<()> {
    if config.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(BowlBotError::Config(
            format!("UTC offset out of range: {} minutes", config.utc_offset_minutes)
        ));
    }

    if config.purge_interval_seconds == 0 {
        return Err(BowlBotError::Config(
            "Event purge interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BowlBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BowlBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
