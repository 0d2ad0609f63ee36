//! Proposal and cancellation of the group's next game

use chrono::Datelike;
use crate::handlers::commands::help::HELP_TEXT;
use crate::handlers::BotContext;
use crate::models::{Event, Group, IncomingMessage};
use crate::services::notification::weekday_name;
use crate::services::OutgoingMessage;
use crate::utils::errors::Result;
use crate::utils::helpers::{escape_markdown, format_game_day, format_time_of_day};

/// Schedule the next game and announce it to the chat
pub async fn propose(ctx: &BotContext, message: &IncomingMessage, group: &mut Group) -> Result<()> {
    let event = ctx
        .services
        .event_service
        .propose(group, message.sender.id, message.received_at)
        .await?;

    let local_start = event.scheduled_at.with_timezone(&ctx.services.event_service.offset());
    let location = group.location.as_deref().unwrap_or_default();
    let text = format!(
        "Good news everyone!\n{} has proposed we go bowling at {} at {} on {}.\n{}",
        escape_markdown(&message.sender.display_name()),
        escape_markdown(location),
        format_time_of_day(local_start.time()),
        weekday_name(local_start.weekday()),
        HELP_TEXT,
    );

    ctx.send(OutgoingMessage::new(message.chat_id, text).markdown()).await?;
    Ok(())
}

/// Remind the chat when the already scheduled game is
pub async fn announce_existing(ctx: &BotContext, message: &IncomingMessage, event: &Event) -> Result<()> {
    let text = format!(
        "Hey {}, the next game is set for {}",
        message.sender.display_name(),
        format_game_day(event.scheduled_at, ctx.services.event_service.offset()),
    );
    ctx.send(OutgoingMessage::new(message.chat_id, text).silent()).await?;
    Ok(())
}

/// Reply to any roster command while nothing is scheduled
pub async fn no_game(ctx: &BotContext, message: &IncomingMessage) -> Result<()> {
    let text = format!(
        "Sorry {}, there is no game in the near future",
        message.sender.display_name()
    );
    ctx.send(OutgoingMessage::new(message.chat_id, text).silent()).await?;
    Ok(())
}

/// Cancel the next game
pub async fn cancel(ctx: &BotContext, message: &IncomingMessage, group: &mut Group) -> Result<()> {
    ctx.services.event_service.cancel(group, message.sender.id).await?;

    let text = format!(
        "Hey everyone, unfortunately bowling has been cancelled by {}",
        message.sender.display_name()
    );
    ctx.send(OutgoingMessage::new(message.chat_id, text)).await?;
    Ok(())
}
