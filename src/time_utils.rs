// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.
//!
//! Relative formats take an explicit `now` so callers (and tests) control
//! the reference point. Unparseable timestamps are echoed back unchanged.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a backend timestamp. Naive timestamps (no offset) are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// "Just now", "5m ago", "3h ago", "2d ago", or the date after a week.
pub fn format_message_time(timestamp: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };
    let mins = (now - date).num_minutes();
    let hours = mins / 60;
    let days = hours / 24;

    if mins < 1 {
        "Just now".to_string()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Clock time within the last day, otherwise a short date ("Mar 4").
pub fn format_conversation_time(timestamp: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };
    if (now - date).num_hours() < 24 {
        date.format("%H:%M").to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// Countdown to a ride's departure: "Started", "2 days", "3h 15m" or "40m".
pub fn time_until_ride(start_time: &str, now: DateTime<Utc>) -> String {
    let Some(start) = parse_timestamp(start_time) else {
        return start_time.to_string();
    };
    let diff = start - now;
    if diff.num_milliseconds() < 0 {
        return "Started".to_string();
    }

    let hours = diff.num_hours();
    let minutes = diff.num_minutes() % 60;

    if hours > 24 {
        let days = hours / 24;
        format!("{} day{}", days, if days > 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Date, time and combined renderings of a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParts {
    pub date: String,
    pub time: String,
    pub full: String,
}

pub fn format_date_time(timestamp: &str) -> Option<DateTimeParts> {
    let date = parse_timestamp(timestamp)?;
    Some(DateTimeParts {
        date: date.format("%b %-d, %Y").to_string(),
        time: date.format("%H:%M").to_string(),
        full: date.format("%b %-d, %Y %H:%M").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn ago(delta: Duration) -> String {
        format_utc_rfc3339(now() - delta)
    }

    #[test]
    fn test_parse_naive_timestamp_as_utc() {
        let parsed = parse_timestamp("2025-03-10T12:00:00.123456").unwrap();
        assert_eq!(parsed.timestamp(), now().timestamp());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_format_message_time_buckets() {
        assert_eq!(format_message_time(&ago(Duration::seconds(20)), now()), "Just now");
        assert_eq!(format_message_time(&ago(Duration::minutes(5)), now()), "5m ago");
        assert_eq!(format_message_time(&ago(Duration::hours(3)), now()), "3h ago");
        assert_eq!(format_message_time(&ago(Duration::days(2)), now()), "2d ago");
        assert_eq!(format_message_time(&ago(Duration::days(9)), now()), "Mar 1, 2025");
        assert_eq!(format_message_time("garbage", now()), "garbage");
    }

    #[test]
    fn test_format_conversation_time() {
        assert_eq!(format_conversation_time(&ago(Duration::hours(2)), now()), "10:00");
        assert_eq!(format_conversation_time(&ago(Duration::days(6)), now()), "Mar 4");
    }

    #[test]
    fn test_time_until_ride() {
        let in_future = |d: Duration| format_utc_rfc3339(now() + d);
        assert_eq!(time_until_ride(&ago(Duration::minutes(1)), now()), "Started");
        assert_eq!(time_until_ride(&in_future(Duration::minutes(40)), now()), "40m");
        assert_eq!(
            time_until_ride(&in_future(Duration::minutes(195)), now()),
            "3h 15m"
        );
        assert_eq!(time_until_ride(&in_future(Duration::hours(30)), now()), "1 day");
        assert_eq!(time_until_ride(&in_future(Duration::hours(50)), now()), "2 days");
    }

    #[test]
    fn test_format_date_time_parts() {
        let parts = format_date_time("2025-03-10T08:05:00Z").unwrap();
        assert_eq!(parts.date, "Mar 10, 2025");
        assert_eq!(parts.time, "08:05");
        assert_eq!(parts.full, "Mar 10, 2025 08:05");
    }
}
