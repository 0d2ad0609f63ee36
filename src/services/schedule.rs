//! Weekly recurrence arithmetic

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, TimeZone, Utc, Weekday};

/// Start of the nearest day falling on `weekday`, today included
pub fn next_occurrence(weekday: Weekday, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let today = now.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let days_ahead = (target - today).rem_euclid(7);

    let date = now.date_naive() + Duration::days(days_ahead);
    let midnight = date.and_time(NaiveTime::MIN);
    // Fixed offsets map every local time to exactly one instant
    now.offset().from_utc_datetime(&(midnight - *now.offset()))
}

/// Instant of the next game given the group's weekday and start time.
///
/// Uses the nearest matching day; if that day's start time is not after
/// `now`, the game is the following week.
pub fn scheduled_start(weekday: Weekday, time: NaiveTime, now: DateTime<FixedOffset>) -> DateTime<Utc> {
    let day = next_occurrence(weekday, now);
    let start = day + (time - NaiveTime::MIN);
    let start = if start <= now { start + Duration::days(7) } else { start };
    start.with_timezone(&Utc)
}
