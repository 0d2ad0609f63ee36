//! Event repository implementation
//!
//! Rosters live in a JSONB column keyed by attendee id, so a single
//! attendee can be updated without rewriting anyone else's entry.

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;
use crate::models::{AttendeeId, Event};
use crate::utils::errors::BowlBotError;

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: Uuid,
    group_id: i64,
    scheduled_at: DateTime<Utc>,
    roster: Json<BTreeMap<AttendeeId, u32>>,
    created_by: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            group_id: row.group_id,
            scheduled_at: row.scheduled_at,
            roster: row.roster.0,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, BowlBotError> {
        let row = sqlx::query_as::<_, EventRow>(
            "SELECT id, group_id, scheduled_at, roster, created_by, created_at FROM bowling_events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Event::from))
    }

    /// Insert the event or replace an existing one
    pub async fn upsert(&self, event: &Event) -> Result<(), BowlBotError> {
        sqlx::query(
            r#"
            INSERT INTO bowling_events (id, group_id, scheduled_at, roster, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET scheduled_at = EXCLUDED.scheduled_at,
                roster = EXCLUDED.roster
            "#
        )
        .bind(event.id)
        .bind(event.group_id)
        .bind(event.scheduled_at)
        .bind(Json(&event.roster))
        .bind(event.created_by)
        .bind(event.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete event
    pub async fn delete(&self, id: Uuid) -> Result<(), BowlBotError> {
        sqlx::query("DELETE FROM bowling_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete events scheduled before the cutoff
    pub async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, BowlBotError> {
        let result = sqlx::query("DELETE FROM bowling_events WHERE scheduled_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Set one roster entry
    pub async fn set_attendance(&self, event_id: Uuid, attendee: AttendeeId, seats: u32) -> Result<(), BowlBotError> {
        let seats = i32::try_from(seats)
            .map_err(|_| BowlBotError::InvalidInput(format!("Too many seats: {}", seats)))?;

        let result = sqlx::query(
            "UPDATE bowling_events SET roster = jsonb_set(roster, ARRAY[$2::text], to_jsonb($3::integer)) WHERE id = $1"
        )
        .bind(event_id)
        .bind(attendee.to_string())
        .bind(seats)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(BowlBotError::EventNotFound { event_id });
        }
        Ok(())
    }

    /// Remove one roster entry
    pub async fn remove_attendance(&self, event_id: Uuid, attendee: AttendeeId) -> Result<(), BowlBotError> {
        let result = sqlx::query("UPDATE bowling_events SET roster = roster - $2::text WHERE id = $1")
            .bind(event_id)
            .bind(attendee.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BowlBotError::EventNotFound { event_id });
        }
        Ok(())
    }

    /// Count events that have not happened yet
    pub async fn count_upcoming(&self) -> Result<i64, BowlBotError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bowling_events WHERE scheduled_at > NOW()")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
