//! Group setup dialog
//!
//! Asks where, on which day and at what time the group bowls. Every prompt
//! is sent as a reply and the next answer must reply to it.

use tracing::{debug, info};
use crate::handlers::BotContext;
use crate::models::IncomingMessage;
use crate::services::notification::weekday_name;
use crate::services::{OutgoingMessage, ReplyMarkupKind};
use crate::state::{PendingDialog, SetupAnswer, SetupStep};
use crate::utils::errors::Result;
use crate::utils::helpers::format_time_of_day;
use crate::utils::logging::log_group_event;

const RETRY_PROMPT: &str = "I'm sorry, what?";

/// Greet an unconfigured group and ask the first question
pub async fn ask_for_configuration(ctx: &BotContext, message: &IncomingMessage) -> Result<()> {
    let greeting = format!(
        "Hi {}, your group isn't set up for bowling yet. Please answer the following questions.",
        message.sender.display_name()
    );
    ctx.send(OutgoingMessage::new(message.chat_id, greeting)).await?;

    log_group_event(message.chat_id, "setup_started", Some(message.sender.id), None);
    ask(ctx, message, SetupStep::FIRST, message.sender.id, prompt_for(SetupStep::FIRST)).await
}

/// Apply an answer to a pending setup question and ask the next one
pub async fn continue_setup(ctx: &BotContext, message: &IncomingMessage, dialog: PendingDialog) -> Result<()> {
    debug!(chat_id = dialog.chat_id, step = %dialog.step, user_id = message.sender.id, "Continuing setup dialog");

    let answer = dialog.step.accept(&message.text);
    if answer == SetupAnswer::Retry {
        return ask(ctx, message, dialog.step, dialog.started_by, RETRY_PROMPT).await;
    }

    let mut group = ctx.load_group(message.chat_id).await?;
    match answer {
        SetupAnswer::Location(location) => group.location = Some(location),
        SetupAnswer::Weekday(weekday) => group.weekday = Some(weekday),
        SetupAnswer::Time(time) => group.start_time = Some(time),
        SetupAnswer::Retry => {}
    }
    ctx.store.save_group(&group).await?;

    match dialog.step.next() {
        Some(step) => ask(ctx, message, step, dialog.started_by, prompt_for(step)).await,
        None => {
            let done = OutgoingMessage::new(message.chat_id, "Awesome, all done")
                .reply_to(message.message_id)
                .silent();
            ctx.send(done).await?;

            let details = group
                .schedule()
                .map(|(weekday, time)| format!("{} at {}", weekday_name(weekday), format_time_of_day(time)));
            log_group_event(group.id, "setup_completed", Some(message.sender.id), details.as_deref());
            info!(group_id = group.id, configured = group.is_configured(), "Group setup finished");
            Ok(())
        }
    }
}

fn prompt_for(step: SetupStep) -> &'static str {
    match step {
        SetupStep::Location => "Where is it that you go bowling?",
        SetupStep::Weekday => "And what day do you do this?",
        SetupStep::Time => "And what time does it start?",
    }
}

fn markup_for(step: SetupStep) -> ReplyMarkupKind {
    match step {
        SetupStep::Weekday => ReplyMarkupKind::WeekdayKeyboard,
        SetupStep::Location | SetupStep::Time => ReplyMarkupKind::ForceReply,
    }
}

/// Send a prompt as a reply and wait for the answer to it
async fn ask(
    ctx: &BotContext,
    message: &IncomingMessage,
    step: SetupStep,
    started_by: i64,
    text: &str,
) -> Result<()> {
    let prompt = OutgoingMessage::new(message.chat_id, text)
        .reply_to(message.message_id)
        .markup(markup_for(step))
        .silent();
    let prompt_id = ctx.send(prompt).await?;
    ctx.conversations.register(message.chat_id, prompt_id, step, started_by);
    Ok(())
}
