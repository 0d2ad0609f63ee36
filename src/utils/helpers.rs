//! Helper functions and utilities
//!
//! Small text helpers shared by the command and dialog handlers.

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

/// Pick the singular or plural form for a count
pub fn plural<'a>(count: u32, singular: &'a str, multiple: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        multiple
    }
}

/// Largest count a user may type for guests
pub const MAX_COUNT: u32 = 100;

/// Parse a count typed by a user; only integers in `1..=MAX_COUNT` are accepted
pub fn parse_count(text: &str) -> Option<u32> {
    match text.trim().parse::<u32>() {
        Ok(n) if (1..=MAX_COUNT).contains(&n) => Some(n),
        _ => None,
    }
}

/// Escape characters that have meaning in Telegram's legacy Markdown
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Format a time of day the way the setup dialog accepts it
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Format an event date as "Friday 13" in the groups' local time
pub fn format_game_day(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp.with_timezone(&offset).format("%A %-d").to_string()
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
