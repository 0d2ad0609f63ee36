//! Outbound messages
//!
//! Handlers compose `OutgoingMessage`s and hand them to a `Messenger`.
//! `TelegramMessenger` delivers them through the Bot API; tests record them.

use async_trait::async_trait;
use chrono::Weekday;
use teloxide::{
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{
        ChatId, ForceReply, KeyboardButton, KeyboardMarkup, MessageId, ParseMode, ReplyMarkup,
        ReplyParameters,
    },
    Bot,
};
use tracing::{debug, error};
use crate::utils::errors::{BowlBotError, Result};

/// Input affordance attached to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMarkupKind {
    /// Open a reply to this message in the recipient's client
    ForceReply,
    /// One-time keyboard listing the days of the week
    WeekdayKeyboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,
    pub reply_to: Option<i32>,
    pub markup: Option<ReplyMarkupKind>,
    /// Deliver without a notification sound
    pub silent: bool,
    /// Text uses Telegram's legacy Markdown
    pub markdown: bool,
}

impl OutgoingMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to: None,
            markup: None,
            silent: false,
            markdown: false,
        }
    }

    pub fn reply_to(mut self, message_id: i32) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    pub fn markup(mut self, markup: ReplyMarkupKind) -> Self {
        self.markup = Some(markup);
        self
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn markdown(mut self) -> Self {
        self.markdown = true;
        self
    }
}

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver a message, returning the id it was given in the chat
    async fn send(&self, message: OutgoingMessage) -> Result<i32>;
}

/// Messenger backed by the Telegram Bot API
#[derive(Clone, Debug)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, message: OutgoingMessage) -> Result<i32> {
        let chat_id = message.chat_id;
        let mut request = self.bot.send_message(ChatId(chat_id), message.text);

        if let Some(reply_to) = message.reply_to {
            request = request.reply_parameters(ReplyParameters::new(MessageId(reply_to)));
        }
        if let Some(markup) = message.markup {
            request = request.reply_markup(telegram_markup(markup));
        }
        if message.silent {
            request = request.disable_notification(true);
        }
        if message.markdown {
            request = request.parse_mode(ParseMode::Markdown);
        }

        match request.await {
            Ok(sent) => {
                debug!(chat_id = chat_id, message_id = sent.id.0, "Message sent");
                Ok(sent.id.0)
            }
            Err(e) => {
                error!(chat_id = chat_id, error = %e, "Failed to send message");
                Err(BowlBotError::Telegram(e))
            }
        }
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English weekday name
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn telegram_markup(kind: ReplyMarkupKind) -> ReplyMarkup {
    match kind {
        ReplyMarkupKind::ForceReply => ReplyMarkup::ForceReply(ForceReply::new().selective()),
        ReplyMarkupKind::WeekdayKeyboard => {
            let rows = WEEKDAYS
                .iter()
                .map(|day| vec![KeyboardButton::new(weekday_name(*day))])
                .collect::<Vec<_>>();
            ReplyMarkup::Keyboard(
                KeyboardMarkup::new(rows)
                    .one_time_keyboard()
                    .resize_keyboard()
                    .selective(),
            )
        }
    }
}
