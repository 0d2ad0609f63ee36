//! Group repository implementation

use chrono::{NaiveTime, Weekday};
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;
use crate::models::Group;
use crate::utils::errors::BowlBotError;

#[derive(Clone, Debug)]
pub struct GroupRepository {
    pool: PgPool,
}

/// Row shape of `bowling_groups`; weekdays are stored as 0 = Monday
#[derive(Debug, FromRow)]
struct GroupRow {
    id: i64,
    name: String,
    location: Option<String>,
    weekday: Option<i16>,
    start_time: Option<NaiveTime>,
    next_event: Option<Uuid>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        let weekday = row.weekday.and_then(|day| {
            let parsed = u8::try_from(day).ok().and_then(|d| Weekday::try_from(d).ok());
            if parsed.is_none() {
                warn!(group_id = row.id, weekday = day, "Ignoring invalid stored weekday");
            }
            parsed
        });

        Group {
            id: row.id,
            name: row.name,
            location: row.location,
            weekday,
            start_time: row.start_time,
            next_event: row.next_event,
        }
    }
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find group by chat ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Group>, BowlBotError> {
        let row = sqlx::query_as::<_, GroupRow>(
            "SELECT id, name, location, weekday, start_time, next_event FROM bowling_groups WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Group::from))
    }

    /// Insert the group or overwrite every field of an existing one
    pub async fn upsert(&self, group: &Group) -> Result<(), BowlBotError> {
        sqlx::query(
            r#"
            INSERT INTO bowling_groups (id, name, location, weekday, start_time, next_event, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                location = EXCLUDED.location,
                weekday = EXCLUDED.weekday,
                start_time = EXCLUDED.start_time,
                next_event = EXCLUDED.next_event,
                updated_at = NOW()
            "#
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(&group.location)
        .bind(group.weekday.map(|day| day.num_days_from_monday() as i16))
        .bind(group.start_time)
        .bind(group.next_event)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Count configured groups
    pub async fn count_configured(&self) -> Result<i64, BowlBotError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bowling_groups WHERE location IS NOT NULL AND weekday IS NOT NULL AND start_time IS NOT NULL"
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
