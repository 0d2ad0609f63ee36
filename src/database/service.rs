//! Database service layer
//!
//! Composes the PostgreSQL repositories behind the `Store` interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::database::{DatabasePool, EventRepository, GroupRepository, Store, UserRepository};
use crate::models::{AttendeeId, Event, Group, User};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub groups: GroupRepository,
    pub events: EventRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            events: EventRepository::new(pool),
        }
    }

    /// Get system statistics
    pub async fn get_system_stats(&self) -> Result<serde_json::Value> {
        let configured_groups = self.groups.count_configured().await?;
        let upcoming_events = self.events.count_upcoming().await?;

        Ok(serde_json::json!({
            "configured_groups": configured_groups,
            "upcoming_events": upcoming_events
        }))
    }
}

#[async_trait]
impl Store for DatabaseService {
    async fn load_group(&self, id: i64) -> Result<Option<Group>> {
        self.groups.find_by_id(id).await
    }

    async fn save_group(&self, group: &Group) -> Result<()> {
        self.groups.upsert(group).await
    }

    async fn load_event(&self, id: Uuid) -> Result<Option<Event>> {
        self.events.find_by_id(id).await
    }

    async fn save_event(&self, event: &Event) -> Result<()> {
        self.events.upsert(event).await
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        self.events.delete(id).await
    }

    async fn delete_events_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        self.events.delete_before(cutoff).await
    }

    async fn put_attendance(&self, event_id: Uuid, attendee: AttendeeId, seats: u32) -> Result<()> {
        self.events.set_attendance(event_id, attendee, seats).await
    }

    async fn remove_attendance(&self, event_id: Uuid, attendee: AttendeeId) -> Result<()> {
        self.events.remove_attendance(event_id, attendee).await
    }

    async fn load_user(&self, id: i64) -> Result<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.users.upsert(user).await
    }
}
