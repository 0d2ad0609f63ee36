//! Command handlers module
//!
//! Parses slash commands and routes them to the roster and event handlers.

pub mod bowling;
pub mod help;
pub mod roster;

use std::sync::OnceLock;
use regex::Regex;
use teloxide::utils::command::BotCommands;
use tracing::{debug, warn};
use crate::handlers::messages::group_setup;
use crate::handlers::BotContext;
use crate::models::IncomingMessage;
use crate::services::OutgoingMessage;
use crate::utils::errors::{BowlBotError, Result};

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Bowling commands:")]
pub enum Command {
    #[command(description = "show the available commands")]
    Help,
    #[command(description = "propose the next game")]
    Bowling,
    #[command(description = "count me in, /me+2 to bring two friends")]
    Me(String),
    #[command(description = "bring fewer friends, e.g. /sub 1")]
    Sub(String),
    #[command(description = "I can no longer make it")]
    Out,
    #[command(description = "how many people are coming")]
    Count,
    #[command(description = "who is coming")]
    Who,
    #[command(description = "cancel the next game")]
    Cancel,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Bowling => "bowling",
            Command::Me(_) => "me",
            Command::Sub(_) => "sub",
            Command::Out => "out",
            Command::Count => "count",
            Command::Who => "who",
            Command::Cancel => "cancel",
        }
    }
}

fn command_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^/(?P<verb>[A-Za-z0-9_]+)(?P<sign>[+-][^\s@]*)?(?:@(?P<bot>[A-Za-z0-9_]+))?(?:\s+(?P<args>.*))?$").ok()
    })
    .as_ref()
}

/// Parse a message as a command.
///
/// Accepts `/verb`, `/verb@bot args` and the `/me+N` and `/sub-N`
/// shorthands. Returns `None` for unknown verbs and for commands addressed
/// to a different bot.
pub fn parse_command_text(text: &str, bot_username: &str) -> Option<Command> {
    let caps = command_regex()?.captures(text.trim())?;

    if let Some(addressee) = caps.name("bot") {
        if !addressee.as_str().eq_ignore_ascii_case(bot_username.trim_start_matches('@')) {
            return None;
        }
    }

    let verb = caps.name("verb")?.as_str().to_lowercase();
    let args = caps.name("args").map(|m| m.as_str().trim().to_string()).unwrap_or_default();

    if let Some(sign) = caps.name("sign") {
        let sign = sign.as_str();
        return match verb.as_str() {
            "me" if sign.starts_with('+') => Some(Command::Me(sign.to_string())),
            "sub" if sign.starts_with('-') => Some(Command::Sub(sign.to_string())),
            _ => None,
        };
    }

    match verb.as_str() {
        "help" => Some(Command::Help),
        "bowling" => Some(Command::Bowling),
        "me" => Some(Command::Me(args)),
        "sub" => Some(Command::Sub(args)),
        "out" => Some(Command::Out),
        "count" => Some(Command::Count),
        "who" => Some(Command::Who),
        "cancel" => Some(Command::Cancel),
        _ => None,
    }
}

/// Main command dispatcher
pub async fn dispatch(ctx: &BotContext, message: &IncomingMessage, command: Command) -> Result<()> {
    debug!(chat_id = message.chat_id, user_id = message.sender.id, command = command.name(), "Dispatching command");

    match route(ctx, message, command).await {
        Err(e) if is_store_failure(&e) => {
            let apology = OutgoingMessage::new(
                message.chat_id,
                format!(
                    "Sorry {}, something went wrong and I couldn't do that. Please try again later.",
                    message.sender.display_name()
                ),
            )
            .silent();
            if let Err(send_error) = ctx.send(apology).await {
                warn!(chat_id = message.chat_id, error = %send_error, "Failed to send apology");
            }
            Err(e)
        }
        other => other,
    }
}

async fn route(ctx: &BotContext, message: &IncomingMessage, command: Command) -> Result<()> {
    let mut group = ctx.load_group(message.chat_id).await?;

    if !group.is_configured() {
        group.name = message.chat_title.clone().unwrap_or_default();
        ctx.store.save_group(&group).await?;
        return group_setup::ask_for_configuration(ctx, message).await;
    }

    let event = ctx
        .services
        .event_service
        .current_event(&group, message.received_at)
        .await?;

    let Some(mut event) = event else {
        return match command {
            Command::Bowling => bowling::propose(ctx, message, &mut group).await,
            _ => bowling::no_game(ctx, message).await,
        };
    };

    match command {
        Command::Bowling => bowling::announce_existing(ctx, message, &event).await,
        Command::Help => help::handle_help(ctx, message).await,
        Command::Me(args) => roster::handle_me(ctx, message, &mut event, &args).await,
        Command::Sub(args) => roster::handle_sub(ctx, message, &mut event, &args).await,
        Command::Out => roster::handle_out(ctx, message, &mut event).await,
        Command::Count => roster::handle_count(ctx, message, &event).await,
        Command::Who => roster::handle_who(ctx, message, &event).await,
        Command::Cancel => bowling::cancel(ctx, message, &mut group).await,
    }
}

fn is_store_failure(err: &BowlBotError) -> bool {
    matches!(
        err,
        BowlBotError::Database(_) | BowlBotError::EventNotFound { .. } | BowlBotError::InvalidInput(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "bowlbot";

    #[test]
    fn test_plain_commands() {
        assert_eq!(parse_command_text("/bowling", BOT), Some(Command::Bowling));
        assert_eq!(parse_command_text("/count", BOT), Some(Command::Count));
        assert_eq!(parse_command_text("/WHO", BOT), Some(Command::Who));
        assert_eq!(parse_command_text("/me", BOT), Some(Command::Me(String::new())));
    }

    #[test]
    fn test_arguments() {
        assert_eq!(parse_command_text("/me +2", BOT), Some(Command::Me("+2".to_string())));
        assert_eq!(parse_command_text("/sub 1", BOT), Some(Command::Sub("1".to_string())));
        assert_eq!(parse_command_text("/sub  two ", BOT), Some(Command::Sub("two".to_string())));
    }

    #[test]
    fn test_shorthands() {
        assert_eq!(parse_command_text("/me+2", BOT), Some(Command::Me("+2".to_string())));
        assert_eq!(parse_command_text("/sub-1", BOT), Some(Command::Sub("-1".to_string())));
        assert_eq!(parse_command_text("/me+2@BowlBot", BOT), Some(Command::Me("+2".to_string())));
        assert_eq!(parse_command_text("/me-2", BOT), None);
        assert_eq!(parse_command_text("/count+1", BOT), None);
    }

    #[test]
    fn test_bot_mention() {
        assert_eq!(parse_command_text("/count@bowlbot", BOT), Some(Command::Count));
        assert_eq!(parse_command_text("/me@bowlbot +1", BOT), Some(Command::Me("+1".to_string())));
        assert_eq!(parse_command_text("/count@otherbot", BOT), None);
    }

    #[test]
    fn test_not_commands() {
        assert_eq!(parse_command_text("/dance", BOT), None);
        assert_eq!(parse_command_text("count", BOT), None);
        assert_eq!(parse_command_text("/", BOT), None);
    }

    #[test]
    fn test_store_failures_get_an_apology() {
        assert!(is_store_failure(&BowlBotError::Database(sqlx::Error::PoolTimedOut)));
        assert!(is_store_failure(&BowlBotError::EventNotFound { event_id: uuid::Uuid::nil() }));
        assert!(is_store_failure(&BowlBotError::InvalidInput("Too many seats".to_string())));
        assert!(!is_store_failure(&BowlBotError::Config("missing token".to_string())));
    }

    #[test]
    fn test_bot_command_list() {
        let names: Vec<_> = Command::bot_commands().into_iter().map(|c| c.command).collect();
        assert_eq!(names.len(), 8);
        assert!(names.iter().any(|name| name.ends_with("bowling")));
    }
}
