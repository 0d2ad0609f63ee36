//! Group model

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group chat's bowling configuration and its current event link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Telegram chat id
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub weekday: Option<Weekday>,
    pub start_time: Option<NaiveTime>,
    /// Weak reference to the current event; may point at a past or purged event
    pub next_event: Option<Uuid>,
}

impl Group {
    /// A fresh, unconfigured group
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: String::new(),
            location: None,
            weekday: None,
            start_time: None,
            next_event: None,
        }
    }

    /// True once location, weekday and start time have all been set
    pub fn is_configured(&self) -> bool {
        self.location.is_some() && self.weekday.is_some() && self.start_time.is_some()
    }

    /// Weekday and start time, if both are configured
    pub fn schedule(&self) -> Option<(Weekday, NaiveTime)> {
        Some((self.weekday?, self.start_time?))
    }
}
