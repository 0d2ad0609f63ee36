//! Inbound chat message
//!
//! Transport-neutral view of a Telegram message. Handlers only ever see this
//! type, which keeps them testable without a Bot API.

use chrono::{DateTime, Utc};
use teloxide::types::Message;
use super::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    /// Group or supergroup
    Group,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub message_id: i32,
    pub chat_id: i64,
    pub chat_kind: ChatKind,
    pub chat_title: Option<String>,
    pub sender: User,
    pub text: String,
    pub reply_to_message_id: Option<i32>,
    pub forwarded_from: Option<User>,
    /// Send time, or the edit time for edited messages
    pub received_at: DateTime<Utc>,
}

impl IncomingMessage {
    /// Build from a Telegram message; `None` for messages without a sender or text
    pub fn from_telegram(msg: &Message) -> Option<Self> {
        let sender = msg.from.as_ref().map(User::from)?;
        let text = msg.text()?.to_string();

        let chat_kind = if msg.chat.is_group() || msg.chat.is_supergroup() {
            ChatKind::Group
        } else {
            ChatKind::Private
        };

        Some(Self {
            message_id: msg.id.0,
            chat_id: msg.chat.id.0,
            chat_kind,
            chat_title: msg.chat.title().map(str::to_string),
            sender,
            text,
            reply_to_message_id: msg.reply_to_message().map(|reply| reply.id.0),
            forwarded_from: msg.forward_from_user().map(User::from),
            received_at: msg.edit_date().copied().unwrap_or(msg.date),
        })
    }

    pub fn is_group_chat(&self) -> bool {
        self.chat_kind == ChatKind::Group
    }
}
