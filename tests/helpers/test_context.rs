//! Test context: a fully wired bot over in-memory collaborators

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc, Weekday};
use uuid::Uuid;
use bowlbot::database::{MemoryStore, Store};
use bowlbot::handlers::{handle_incoming, BotContext};
use bowlbot::models::{AttendeeId, ChatKind, Event, Group, IncomingMessage, User};
use bowlbot::services::ServiceFactory;
use bowlbot::state::ConversationTracker;
use bowlbot::{BowlBotError, Result, Settings};
use super::{RecordingMessenger, BOT_USERNAME, GROUP_CHAT_ID, GROUP_TITLE};

/// Memory store whose roster writes can be made to fail
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_roster_writes: AtomicBool,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.fail_roster_writes.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.fail_roster_writes.load(Ordering::SeqCst) {
            return Err(BowlBotError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for FlakyStore {
    async fn load_group(&self, id: i64) -> Result<Option<Group>> {
        self.inner.load_group(id).await
    }

    async fn save_group(&self, group: &Group) -> Result<()> {
        self.inner.save_group(group).await
    }

    async fn load_event(&self, id: Uuid) -> Result<Option<Event>> {
        self.inner.load_event(id).await
    }

    async fn save_event(&self, event: &Event) -> Result<()> {
        self.inner.save_event(event).await
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        self.inner.delete_event(id).await
    }

    async fn delete_events_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        self.inner.delete_events_before(cutoff).await
    }

    async fn put_attendance(&self, event_id: Uuid, attendee: AttendeeId, seats: u32) -> Result<()> {
        self.check()?;
        self.inner.put_attendance(event_id, attendee, seats).await
    }

    async fn remove_attendance(&self, event_id: Uuid, attendee: AttendeeId) -> Result<()> {
        self.check()?;
        self.inner.remove_attendance(event_id, attendee).await
    }

    async fn load_user(&self, id: i64) -> Result<Option<User>> {
        self.inner.load_user(id).await
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.inner.save_user(user).await
    }
}

pub struct TestContext {
    pub bot: BotContext,
    pub messenger: Arc<RecordingMessenger>,
    pub store: Arc<FlakyStore>,
    pub conversations: Arc<ConversationTracker>,
    pub now: DateTime<Utc>,
    next_message_id: AtomicI32,
}

impl TestContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        let settings = Settings::default();
        let store = Arc::new(FlakyStore::default());
        let messenger = Arc::new(RecordingMessenger::new());
        let conversations = Arc::new(ConversationTracker::new(settings.conversation.ttl()));

        let bot = BotContext {
            store: store.clone(),
            messenger: messenger.clone(),
            services: ServiceFactory::new(store.clone(), &settings),
            conversations: conversations.clone(),
            bot_username: BOT_USERNAME.to_string(),
        };

        Self {
            bot,
            messenger,
            store,
            conversations,
            now,
            next_message_id: AtomicI32::new(1),
        }
    }

    /// A group message from `sender` at the context's clock
    pub fn message(&self, sender: &User, text: &str) -> IncomingMessage {
        IncomingMessage {
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
            chat_id: GROUP_CHAT_ID,
            chat_kind: ChatKind::Group,
            chat_title: Some(GROUP_TITLE.to_string()),
            sender: sender.clone(),
            text: text.to_string(),
            reply_to_message_id: None,
            forwarded_from: None,
            received_at: self.now,
        }
    }

    pub fn reply(&self, sender: &User, text: &str, reply_to: i32) -> IncomingMessage {
        IncomingMessage {
            reply_to_message_id: Some(reply_to),
            ..self.message(sender, text)
        }
    }

    pub async fn handle(&self, message: IncomingMessage) -> Result<()> {
        handle_incoming(&self.bot, message).await
    }

    /// Handle a message and return the text of the last reply
    pub async fn say(&self, sender: &User, text: &str) -> String {
        let message = self.message(sender, text);
        self.handle(message).await.expect("handler failed");
        self.messenger.last_text()
    }

    /// Store a fully configured group directly
    pub async fn configure_group(&self, location: &str, weekday: Weekday, start: NaiveTime) {
        let mut group = Group::new(GROUP_CHAT_ID);
        group.name = GROUP_TITLE.to_string();
        group.location = Some(location.to_string());
        group.weekday = Some(weekday);
        group.start_time = Some(start);
        self.store.save_group(&group).await.unwrap();
    }

    pub async fn group(&self) -> Group {
        self.store.load_group(GROUP_CHAT_ID).await.unwrap().expect("group not stored")
    }

    /// The group's linked event as stored
    pub async fn current_event(&self) -> Option<Event> {
        let id = self.group().await.next_event?;
        self.store.load_event(id).await.unwrap()
    }
}
