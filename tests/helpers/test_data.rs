//! Test data: users, chats and a fixed clock

use chrono::{DateTime, TimeZone, Utc};
use bowlbot::models::User;

pub const GROUP_CHAT_ID: i64 = -1001234567890;
pub const GROUP_TITLE: &str = "Tuesday Strikers";
pub const BOT_USERNAME: &str = "bowlbot";

/// Wednesday 21 October 2026, 09:00 UTC
pub fn wednesday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 21, 9, 0, 0).unwrap()
}

pub fn alice() -> User {
    User {
        id: 111,
        first_name: "Alice".to_string(),
        last_name: Some("Archer".to_string()),
        username: Some("alice".to_string()),
    }
}

pub fn bob() -> User {
    User {
        id: 222,
        first_name: "Bob".to_string(),
        last_name: None,
        username: None,
    }
}

pub fn carol() -> User {
    User {
        id: 333,
        first_name: "Carol".to_string(),
        last_name: Some("Cue".to_string()),
        username: None,
    }
}
