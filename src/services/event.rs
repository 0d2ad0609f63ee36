//! Event service implementation
//!
//! Lifecycle of a group's bowling night: proposal, attendance, cancellation
//! and the eventual purge of past events.

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, FixedOffset, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use crate::config::EventsConfig;
use crate::database::Store;
use crate::models::{AttendeeId, Event, Group};
use crate::services::schedule::scheduled_start;
use crate::utils::errors::{BowlBotError, Result};
use crate::utils::logging::{log_event_action, log_group_event};

#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn Store>,
    offset: FixedOffset,
    purge_after: chrono::Duration,
}

impl EventService {
    pub fn new(store: Arc<dyn Store>, config: &EventsConfig) -> Self {
        Self {
            store,
            offset: config.offset(),
            purge_after: config.purge_after(),
        }
    }

    /// Local offset the groups' schedules are expressed in
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The group's linked event, if it is still ahead of `now`
    pub async fn current_event(&self, group: &Group, now: DateTime<Utc>) -> Result<Option<Event>> {
        let Some(event_id) = group.next_event else {
            return Ok(None);
        };

        match self.store.load_event(event_id).await? {
            Some(event) if event.is_upcoming(now) => Ok(Some(event)),
            Some(_) => {
                debug!(group_id = group.id, event_id = %event_id, "Linked event has passed");
                Ok(None)
            }
            None => {
                debug!(group_id = group.id, event_id = %event_id, "Linked event no longer exists");
                Ok(None)
            }
        }
    }

    /// Schedule the group's next game and link it to the group
    pub async fn propose(&self, group: &mut Group, proposer: i64, now: DateTime<Utc>) -> Result<Event> {
        if let Some(existing) = self.current_event(group, now).await? {
            return Err(BowlBotError::EventAlreadyScheduled {
                group_id: group.id,
                scheduled_at: existing.scheduled_at,
            });
        }

        let (weekday, start_time) = group
            .schedule()
            .ok_or(BowlBotError::GroupNotConfigured { group_id: group.id })?;

        let scheduled_at = scheduled_start(weekday, start_time, now.with_timezone(&self.offset));
        let event = Event::new(group.id, scheduled_at, Some(proposer));

        // Two single-record writes; a crash in between leaves an unlinked
        // event for the purge to collect
        self.store.save_event(&event).await?;
        group.next_event = Some(event.id);
        self.store.save_group(group).await?;

        log_event_action(event.id, "proposed", proposer, Some(&scheduled_at.to_rfc3339()));
        Ok(event)
    }

    /// Persist the attendee's current roster entry, or its removal
    pub async fn save_attendance(&self, event: &Event, attendee: AttendeeId) -> Result<()> {
        match event.seats_for(attendee) {
            Some(seats) => {
                self.store.put_attendance(event.id, attendee, seats).await?;
                log_event_action(event.id, "attendance", attendee, Some(&format!("seats={}", seats)));
            }
            None => {
                self.store.remove_attendance(event.id, attendee).await?;
                log_event_action(event.id, "withdrawn", attendee, None);
            }
        }
        Ok(())
    }

    /// Unlink the group's event; the record itself is left for the purge
    pub async fn cancel(&self, group: &mut Group, cancelled_by: i64) -> Result<()> {
        let previous = group.next_event.take();
        self.store.save_group(group).await?;
        log_group_event(
            group.id,
            "event_cancelled",
            Some(cancelled_by),
            previous.map(|id| id.to_string()).as_deref(),
        );
        Ok(())
    }

    /// Delete events that finished more than the retention period ago
    pub async fn purge_past_events(&self, now: DateTime<Utc>) -> Result<u64> {
        let cutoff = now - self.purge_after;
        let removed = self.store.delete_events_before(cutoff).await?;
        if removed > 0 {
            info!(removed = removed, cutoff = %cutoff, "Purged past events");
        }
        Ok(removed)
    }

    /// Run the purge on a fixed interval until the handle is aborted
    pub fn spawn_purge_task(&self, interval: Duration) -> JoinHandle<()> {
        let service = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(e) = service.purge_past_events(Utc::now()).await {
                    if e.is_recoverable() {
                        warn!(error = %e, "Event purge failed");
                    } else {
                        error!(error = %e, "Event purge failed");
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for EventService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventService")
            .field("offset", &self.offset)
            .field("purge_after", &self.purge_after)
            .finish_non_exhaustive()
    }
}
