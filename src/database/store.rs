//! Record store interface
//!
//! The bot core only talks to persistence through this trait. Every method
//! is a single-record operation; nothing here spans records atomically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::{AttendeeId, Event, Group, User};
use crate::utils::errors::Result;

#[async_trait]
pub trait Store: Send + Sync {
    async fn load_group(&self, id: i64) -> Result<Option<Group>>;

    /// Insert or replace a group
    async fn save_group(&self, group: &Group) -> Result<()>;

    async fn load_event(&self, id: Uuid) -> Result<Option<Event>>;

    /// Insert or replace an event, roster included
    async fn save_event(&self, event: &Event) -> Result<()>;

    async fn delete_event(&self, id: Uuid) -> Result<()>;

    /// Delete every event scheduled before `cutoff`, returning how many went
    async fn delete_events_before(&self, cutoff: DateTime<Utc>) -> Result<u64>;

    /// Set one attendee's seats without touching the rest of the roster
    async fn put_attendance(&self, event_id: Uuid, attendee: AttendeeId, seats: u32) -> Result<()>;

    /// Remove one attendee from the roster
    async fn remove_attendance(&self, event_id: Uuid, attendee: AttendeeId) -> Result<()>;

    async fn load_user(&self, id: i64) -> Result<Option<User>>;

    /// Insert or replace a cached user
    async fn save_user(&self, user: &User) -> Result<()>;
}
