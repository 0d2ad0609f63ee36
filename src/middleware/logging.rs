//! Logging middleware
//!
//! Request-level logging around every handled message.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use crate::models::{ChatKind, IncomingMessage};

/// Handling slower than this is logged as a warning
const SLOW_HANDLER: Duration = Duration::from_secs(1);

/// Log an incoming message before it is handled
pub fn log_incoming(message: &IncomingMessage) {
    let chat_type = match message.chat_kind {
        ChatKind::Group => "group",
        ChatKind::Private => "private",
    };

    debug!(
        chat_id = message.chat_id,
        chat_type = chat_type,
        user_id = message.sender.id,
        message_id = message.message_id,
        reply_to = message.reply_to_message_id,
        forwarded = message.forwarded_from.is_some(),
        text = %message.text,
        "Message received"
    );
}

/// Measures how long one message took to handle
#[derive(Debug)]
pub struct HandlerTimer {
    chat_id: i64,
    message_id: i32,
    started: Instant,
}

impl HandlerTimer {
    pub fn start(message: &IncomingMessage) -> Self {
        Self {
            chat_id: message.chat_id,
            message_id: message.message_id,
            started: Instant::now(),
        }
    }

    /// Log completion, returning the elapsed time
    pub fn finish(self, success: bool) -> Duration {
        let elapsed = self.started.elapsed();
        let duration_ms = elapsed.as_millis() as u64;

        if elapsed > SLOW_HANDLER {
            warn!(chat_id = self.chat_id, message_id = self.message_id, duration_ms = duration_ms, "Slow message handling");
        } else if success {
            debug!(chat_id = self.chat_id, message_id = self.message_id, duration_ms = duration_ms, "Message handled");
        } else {
            info!(chat_id = self.chat_id, message_id = self.message_id, duration_ms = duration_ms, "Message handling failed");
        }

        elapsed
    }
}
