//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::time::Duration;
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "BOWLBOT_CONFIG";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub conversation: ConversationConfig,
    pub events: EventsConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    pub webhook_url: Option<String>,
    pub listen_addr: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Whether the in-memory store was requested instead of PostgreSQL
    pub fn is_memory(&self) -> bool {
        self.url.starts_with("memory:")
    }
}

/// Setup dialog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversationConfig {
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl ConversationConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

/// Event scheduling and retention
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsConfig {
    /// Offset of the groups' local time from UTC
    pub utc_offset_minutes: i32,
    pub purge_after_hours: u32,
    pub purge_interval_seconds: u64,
}

impl EventsConfig {
    /// Local offset, falling back to UTC when out of range
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    pub fn purge_after(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.purge_after_hours))
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub directory: Option<String>,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::from_file(&path)
    }

    /// Load settings from a specific file (extension optional) layered over defaults
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .set_default("bot.token", defaults.bot.token)?
            .set_default("bot.listen_addr", defaults.bot.listen_addr)?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", defaults.database.max_connections)?
            .set_default("database.min_connections", defaults.database.min_connections)?
            .set_default("conversation.ttl_seconds", defaults.conversation.ttl_seconds)?
            .set_default(
                "conversation.sweep_interval_seconds",
                defaults.conversation.sweep_interval_seconds,
            )?
            .set_default("events.utc_offset_minutes", defaults.events.utc_offset_minutes)?
            .set_default("events.purge_after_hours", defaults.events.purge_after_hours)?
            .set_default("events.purge_interval_seconds", defaults.events.purge_interval_seconds)?
            .set_default("logging.level", defaults.logging.level)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("BOWLBOT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BowlBotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                webhook_url: None,
                listen_addr: "127.0.0.1:8000".to_string(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/bowlbot".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            conversation: ConversationConfig {
                ttl_seconds: 600,
                sweep_interval_seconds: 300,
            },
            events: EventsConfig {
                utc_offset_minutes: 0,
                purge_after_hours: 24,
                purge_interval_seconds: 3600,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
            },
        }
    }
}
