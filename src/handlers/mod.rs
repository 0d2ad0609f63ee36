//! Bot handlers module
//!
//! This module contains all chat handlers organized by type:
//! - Command handlers for slash commands
//! - Message handlers for replies continuing the setup dialog

pub mod commands;
pub mod messages;

pub use crate::models::{ChatKind, IncomingMessage};
pub use commands::{parse_command_text, Command};

use std::sync::Arc;
use tracing::debug;
use crate::database::Store;
use crate::middleware::logging::log_incoming;
use crate::models::Group;
use crate::services::{Messenger, OutgoingMessage, ServiceFactory};
use crate::state::ConversationTracker;
use crate::utils::errors::Result;

/// Everything a handler needs, shared across updates
#[derive(Clone)]
pub struct BotContext {
    pub store: Arc<dyn Store>,
    pub messenger: Arc<dyn Messenger>,
    pub services: ServiceFactory,
    pub conversations: Arc<ConversationTracker>,
    /// Username of this bot, without the leading `@`
    pub bot_username: String,
}

impl BotContext {
    /// Send a message, returning its id in the chat
    pub async fn send(&self, message: OutgoingMessage) -> Result<i32> {
        self.messenger.send(message).await
    }

    /// Load the chat's group, or a fresh unconfigured one
    pub async fn load_group(&self, chat_id: i64) -> Result<Group> {
        Ok(self.store.load_group(chat_id).await?.unwrap_or_else(|| Group::new(chat_id)))
    }
}

impl std::fmt::Debug for BotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotContext")
            .field("bot_username", &self.bot_username)
            .finish_non_exhaustive()
    }
}

/// Entry point for every new or edited message
pub async fn handle_incoming(ctx: &BotContext, message: IncomingMessage) -> Result<()> {
    log_incoming(&message);
    ctx.services.user_service.remember(&message).await;

    if !message.is_group_chat() {
        debug!(chat_id = message.chat_id, "Ignoring message outside a group chat");
        return Ok(());
    }

    if message.text.starts_with('/') {
        return match parse_command_text(&message.text, &ctx.bot_username) {
            Some(command) => commands::dispatch(ctx, &message, command).await,
            None => {
                debug!(chat_id = message.chat_id, text = %message.text, "Ignoring unknown command");
                Ok(())
            }
        };
    }

    if let Some(dialog) = ctx.conversations.resolve(&message) {
        return messages::group_setup::continue_setup(ctx, &message, dialog).await;
    }

    Ok(())
}
