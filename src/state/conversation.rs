//! Reply-correlated conversation tracking
//!
//! Each chat has at most one pending setup dialog. The bot's last prompt id
//! is kept alongside the awaited step; a reply to any other message in that
//! chat is treated as unrelated chatter and leaves the dialog untouched.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use crate::models::IncomingMessage;
use super::expiring::ExpiringMap;
use super::setup::{SetupState, SetupStep};

/// A setup step waiting for its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDialog {
    pub chat_id: i64,
    pub step: SetupStep,
    /// Id of the bot message the answer must reply to
    pub prompt_message_id: i32,
    pub started_by: i64,
}

#[derive(Debug)]
pub struct ConversationTracker {
    dialogs: Mutex<ExpiringMap<i64, PendingDialog>>,
}

impl ConversationTracker {
    pub fn new(ttl: Duration) -> Self {
        Self {
            dialogs: Mutex::new(ExpiringMap::new(ttl)),
        }
    }

    /// Expect a reply to `prompt_message_id` to continue with `step`.
    /// Replaces any dialog already pending in the chat.
    pub fn register(&self, chat_id: i64, prompt_message_id: i32, step: SetupStep, started_by: i64) {
        self.register_at(chat_id, prompt_message_id, step, started_by, Instant::now());
    }

    pub fn register_at(
        &self,
        chat_id: i64,
        prompt_message_id: i32,
        step: SetupStep,
        started_by: i64,
        now: Instant,
    ) {
        let dialog = PendingDialog {
            chat_id,
            step,
            prompt_message_id,
            started_by,
        };
        if let Some(previous) = self.lock().insert_at(chat_id, dialog, now) {
            debug!(chat_id = chat_id, previous_step = %previous.step, "Replaced pending dialog");
        }
        debug!(chat_id = chat_id, step = %step, prompt_message_id = prompt_message_id, "Awaiting reply");
    }

    /// Claim the pending dialog a message answers, if any.
    /// A dialog is handed out at most once.
    pub fn resolve(&self, message: &IncomingMessage) -> Option<PendingDialog> {
        self.resolve_at(message.chat_id, message.reply_to_message_id?, Instant::now())
    }

    pub fn resolve_at(&self, chat_id: i64, reply_to_message_id: i32, now: Instant) -> Option<PendingDialog> {
        self.lock().take_if_at(
            &chat_id,
            |dialog| dialog.prompt_message_id == reply_to_message_id,
            now,
        )
    }

    pub fn state(&self, chat_id: i64) -> SetupState {
        self.state_at(chat_id, Instant::now())
    }

    pub fn state_at(&self, chat_id: i64, now: Instant) -> SetupState {
        SetupState::from(self.lock().peek_at(&chat_id, now).map(|dialog| dialog.step))
    }

    /// Drop abandoned dialogs
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        self.lock().sweep_at(now)
    }

    /// Dialogs held, including expired ones not yet swept
    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, ExpiringMap<i64, PendingDialog>> {
        // The map holds no invariants a panicking holder could break
        self.dialogs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns a tracker and its periodic sweep
#[derive(Debug)]
pub struct ConversationManager {
    tracker: Arc<ConversationTracker>,
    sweep_interval: Duration,
    sweep_handle: Option<JoinHandle<()>>,
}

impl ConversationManager {
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            tracker: Arc::new(ConversationTracker::new(ttl)),
            sweep_interval,
            sweep_handle: None,
        }
    }

    /// Start the sweep task
    pub fn start_sweeping(&mut self) {
        if self.sweep_handle.is_some() {
            warn!("Dialog sweep task is already running");
            return;
        }

        let tracker = Arc::clone(&self.tracker);
        let interval = self.sweep_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let removed = tracker.sweep();
                if removed > 0 {
                    info!(removed = removed, "Swept abandoned setup dialogs");
                }
            }
        });

        self.sweep_handle = Some(handle);
        info!(interval = ?self.sweep_interval, "Started dialog sweep task");
    }

    /// Stop the sweep task
    pub fn stop_sweeping(&mut self) {
        if let Some(handle) = self.sweep_handle.take() {
            handle.abort();
            info!("Stopped dialog sweep task");
        }
    }

    pub fn tracker(&self) -> Arc<ConversationTracker> {
        Arc::clone(&self.tracker)
    }
}

impl Drop for ConversationManager {
    fn drop(&mut self) {
        self.stop_sweeping();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(600);
    const CHAT: i64 = -1001;

    #[test]
    fn test_resolve_matching_reply_once() {
        let tracker = ConversationTracker::new(TTL);
        let now = Instant::now();
        tracker.register_at(CHAT, 50, SetupStep::Location, 7, now);

        let dialog = tracker.resolve_at(CHAT, 50, now).unwrap();
        assert_eq!(dialog.step, SetupStep::Location);
        assert_eq!(dialog.started_by, 7);
        assert_eq!(tracker.resolve_at(CHAT, 50, now), None);
        assert_eq!(tracker.state_at(CHAT, now), SetupState::Idle);
    }

    #[test]
    fn test_unrelated_reply_keeps_dialog() {
        let tracker = ConversationTracker::new(TTL);
        let now = Instant::now();
        tracker.register_at(CHAT, 50, SetupStep::Weekday, 7, now);

        assert_eq!(tracker.resolve_at(CHAT, 49, now), None);
        assert_eq!(tracker.resolve_at(CHAT + 1, 50, now), None);
        assert_eq!(tracker.state_at(CHAT, now), SetupState::AwaitingWeekday);
        assert!(tracker.resolve_at(CHAT, 50, now).is_some());
    }

    #[test]
    fn test_expired_dialog_is_unreachable() {
        let tracker = ConversationTracker::new(TTL);
        let now = Instant::now();
        tracker.register_at(CHAT, 50, SetupStep::Time, 7, now);

        assert_eq!(tracker.resolve_at(CHAT, 50, now + TTL), None);
        assert_eq!(tracker.pending_count(), 0);
    }

    #[test]
    fn test_register_replaces_prompt() {
        let tracker = ConversationTracker::new(TTL);
        let now = Instant::now();
        tracker.register_at(CHAT, 50, SetupStep::Location, 7, now);
        tracker.register_at(CHAT, 51, SetupStep::Weekday, 7, now);

        assert_eq!(tracker.resolve_at(CHAT, 50, now), None);
        assert_eq!(tracker.resolve_at(CHAT, 51, now).map(|d| d.step), Some(SetupStep::Weekday));
    }

    #[test]
    fn test_sweep() {
        let tracker = ConversationTracker::new(TTL);
        let now = Instant::now();
        tracker.register_at(CHAT, 50, SetupStep::Location, 7, now);
        tracker.register_at(CHAT - 1, 60, SetupStep::Location, 8, now + Duration::from_secs(300));

        assert_eq!(tracker.sweep_at(now + Duration::from_secs(700)), 1);
        assert_eq!(tracker.pending_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manager_sweeps_periodically() {
        let mut manager = ConversationManager::new(TTL, Duration::from_secs(300));
        let tracker = manager.tracker();
        tracker.register(CHAT, 50, SetupStep::Location, 7);
        manager.start_sweeping();

        tokio::time::sleep(Duration::from_secs(901)).await;
        assert_eq!(tracker.pending_count(), 0);

        manager.stop_sweeping();
    }
}
