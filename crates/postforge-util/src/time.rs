//! Wall-clock time for postforge
//!
//! History timestamps are taken from [`now`] at write time and stored as
//! RFC 3339 in UTC with microseconds (e.g., `2025-12-25T14:30:00.000000Z`).

use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC time
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp for storage.
///
/// Fixed width with microseconds, so lexical order matches time order.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp written by [`format_timestamp`] (or any RFC 3339 string).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Format a timestamp for listings, to the minute.
pub fn format_timestamp_short(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}
