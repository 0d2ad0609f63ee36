//! In-memory store
//!
//! Backs `database.url = "memory:"` and the test suite. Nothing survives a
//! restart.

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;
use crate::database::Store;
use crate::models::{AttendeeId, Event, Group, User};
use crate::utils::errors::{BowlBotError, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: RwLock<HashMap<i64, Group>>,
    events: RwLock<HashMap<Uuid, Event>>,
    users: RwLock<HashMap<i64, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of event records held, linked or not
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load_group(&self, id: i64) -> Result<Option<Group>> {
        Ok(self.groups.read().await.get(&id).cloned())
    }

    async fn save_group(&self, group: &Group) -> Result<()> {
        self.groups.write().await.insert(group.id, group.clone());
        Ok(())
    }

    async fn load_event(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn save_event(&self, event: &Event) -> Result<()> {
        self.events.write().await.insert(event.id, event.clone());
        Ok(())
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        self.events.write().await.remove(&id);
        Ok(())
    }

    async fn delete_events_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|_, event| event.scheduled_at >= cutoff);
        let removed = (before - events.len()) as u64;
        debug!(removed = removed, cutoff = %cutoff, "Purged events from memory store");
        Ok(removed)
    }

    async fn put_attendance(&self, event_id: Uuid, attendee: AttendeeId, seats: u32) -> Result<()> {
        // Same limit as the JSONB integer column
        if i32::try_from(seats).is_err() {
            return Err(BowlBotError::InvalidInput(format!("Too many seats: {}", seats)));
        }
        let mut events = self.events.write().await;
        let event = events
            .get_mut(&event_id)
            .ok_or(BowlBotError::EventNotFound { event_id })?;
        event.roster.insert(attendee, seats);
        Ok(())
    }

    async fn remove_attendance(&self, event_id: Uuid, attendee: AttendeeId) -> Result<()> {
        let mut events = self.events.write().await;
        let event = events
            .get_mut(&event_id)
            .ok_or(BowlBotError::EventNotFound { event_id })?;
        event.roster.remove(&attendee);
        Ok(())
    }

    async fn load_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_attendance_updates_single_key() {
        let store = MemoryStore::new();
        let mut event = Event::new(-1, Utc::now(), None);
        event.record_attendance(1, 0);
        store.save_event(&event).await.unwrap();

        store.put_attendance(event.id, 2, 3).await.unwrap();
        store.remove_attendance(event.id, 1).await.unwrap();

        let loaded = store.load_event(event.id).await.unwrap().unwrap();
        assert_eq!(loaded.seats_for(1), None);
        assert_eq!(loaded.seats_for(2), Some(3));
    }

    #[tokio::test]
    async fn test_attendance_on_missing_event() {
        let store = MemoryStore::new();
        let result = store.put_attendance(Uuid::new_v4(), 1, 1).await;
        assert_matches!(result, Err(BowlBotError::EventNotFound { .. }));
    }

    #[tokio::test]
    async fn test_attendance_rejects_oversized_seats() {
        let store = MemoryStore::new();
        let event = Event::new(-1, Utc::now(), None);
        store.save_event(&event).await.unwrap();

        let result = store.put_attendance(event.id, 1, u32::MAX).await;
        assert_matches!(result, Err(BowlBotError::InvalidInput(_)));
        assert!(store.load_event(event.id).await.unwrap().unwrap().roster.is_empty());
    }

    #[tokio::test]
    async fn test_delete_events_before() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let old = Event::new(-1, now - chrono::Duration::days(3), None);
        let upcoming = Event::new(-1, now + chrono::Duration::days(3), None);
        store.save_event(&old).await.unwrap();
        store.save_event(&upcoming).await.unwrap();

        assert_eq!(store.delete_events_before(now).await.unwrap(), 1);
        assert!(store.load_event(old.id).await.unwrap().is_none());
        assert!(store.load_event(upcoming.id).await.unwrap().is_some());
    }
}
