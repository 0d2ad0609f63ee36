//! Group setup dialog
//!
//! The dialog asks three questions in order: location, weekday, start time.
//! Each step parses the user's answer; anything unparseable asks again.

use std::fmt;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use crate::utils::helpers::normalize_whitespace;

/// Question the bot is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetupStep {
    Location,
    Weekday,
    Time,
}

/// Per-chat dialog state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupState {
    Idle,
    AwaitingLocation,
    AwaitingWeekday,
    AwaitingTime,
}

/// Parsed answer to a setup question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAnswer {
    Location(String),
    Weekday(Weekday),
    Time(NaiveTime),
    /// Answer could not be understood; the same step is asked again
    Retry,
}

impl SetupStep {
    /// First question of the dialog
    pub const FIRST: SetupStep = SetupStep::Location;

    pub fn accept(self, answer: &str) -> SetupAnswer {
        let answer = answer.trim();
        match self {
            SetupStep::Location => {
                let location = normalize_whitespace(answer);
                if location.is_empty() {
                    SetupAnswer::Retry
                } else {
                    SetupAnswer::Location(location)
                }
            }
            SetupStep::Weekday => parse_weekday(answer)
                .map(SetupAnswer::Weekday)
                .unwrap_or(SetupAnswer::Retry),
            SetupStep::Time => NaiveTime::parse_from_str(answer, "%H:%M")
                .map(SetupAnswer::Time)
                .unwrap_or(SetupAnswer::Retry),
        }
    }

    /// Step following this one, `None` once the dialog is complete
    pub fn next(self) -> Option<SetupStep> {
        match self {
            SetupStep::Location => Some(SetupStep::Weekday),
            SetupStep::Weekday => Some(SetupStep::Time),
            SetupStep::Time => None,
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupStep::Location => write!(f, "location"),
            SetupStep::Weekday => write!(f, "weekday"),
            SetupStep::Time => write!(f, "time"),
        }
    }
}

impl From<Option<SetupStep>> for SetupState {
    fn from(step: Option<SetupStep>) -> Self {
        match step {
            None => SetupState::Idle,
            Some(SetupStep::Location) => SetupState::AwaitingLocation,
            Some(SetupStep::Weekday) => SetupState::AwaitingWeekday,
            Some(SetupStep::Time) => SetupState::AwaitingTime,
        }
    }
}

/// English weekday, full or three-letter, any case
fn parse_weekday(text: &str) -> Option<Weekday> {
    let day = match text.to_lowercase().as_str() {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}
