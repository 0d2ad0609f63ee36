//! BowlBot Telegram Bot
//!
//! Organises a group chat's weekly bowling game: a short reply-driven setup
//! dialog records where and when the group bowls, then members propose the
//! next game, sign up with or without guests and check who is coming.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{BowlBotError, Result};

// Re-export main components for easy access
pub use database::{DatabaseService, MemoryStore, Store};
pub use handlers::{handle_incoming, BotContext};
pub use services::ServiceFactory;
pub use state::{ConversationManager, ConversationTracker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
