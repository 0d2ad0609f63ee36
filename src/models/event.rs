//! Event model
//!
//! One concrete bowling night and its roster. Roster values count seats:
//! 1 is the attendee alone, N is the attendee plus N-1 guests.

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Telegram user id of an attendee
pub type AttendeeId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub group_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub roster: BTreeMap<AttendeeId, u32>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// How a `/me` changed the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceChange {
    New,
    Replaced { previous: u32 },
}

/// Result of reducing an attendee's guests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOutcome {
    NotAttending,
    Reduced { seats: u32 },
}

/// Result of withdrawing from an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawOutcome {
    NotAttending,
    Withdrawn { seats: u32 },
}

impl Event {
    pub fn new(group_id: i64, scheduled_at: DateTime<Utc>, created_by: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            scheduled_at,
            roster: BTreeMap::new(),
            created_by,
            created_at: Utc::now(),
        }
    }

    /// An event stays reachable until its scheduled time has passed
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at > now
    }

    pub fn seats_for(&self, attendee: AttendeeId) -> Option<u32> {
        self.roster.get(&attendee).copied()
    }

    /// Overwrite the attendee's seats with themselves plus `extra_guests`
    pub fn record_attendance(&mut self, attendee: AttendeeId, extra_guests: u32) -> AttendanceChange {
        let seats = extra_guests.saturating_add(1);
        match self.roster.insert(attendee, seats) {
            Some(previous) => AttendanceChange::Replaced { previous },
            None => AttendanceChange::New,
        }
    }

    /// Drop up to `reduce_by` guests; the attendee's own seat is never removed
    pub fn reduce_attendance(&mut self, attendee: AttendeeId, reduce_by: u32) -> ReduceOutcome {
        match self.roster.get_mut(&attendee) {
            Some(seats) => {
                *seats = seats.saturating_sub(reduce_by).max(1);
                ReduceOutcome::Reduced { seats: *seats }
            }
            None => ReduceOutcome::NotAttending,
        }
    }

    pub fn withdraw(&mut self, attendee: AttendeeId) -> WithdrawOutcome {
        match self.roster.remove(&attendee) {
            Some(seats) => WithdrawOutcome::Withdrawn { seats },
            None => WithdrawOutcome::NotAttending,
        }
    }

    pub fn total_attendance(&self) -> u32 {
        self.roster.values().fold(0u32, |total, seats| total.saturating_add(*seats))
    }
}
