//! Deadline timestamp parsing.
//!
//! Catalogue entries carry deadlines as strings. They are parsed once, at
//! ingest, into UTC instants; an unreadable deadline fails the whole catalogue.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a deadline string into a UTC instant.
///
/// Accepted forms, tried in order:
/// - RFC 3339 with an offset (`2025-06-01T23:59:59+08:00`)
/// - naive date-time, read in the local time zone (`2025-06-01T23:59:59`, `2025-06-01 23:59`)
/// - bare date, read as UTC midnight (`2025-06-01`)
pub fn parse_deadline(s: &str) -> Result<DateTime<Utc>, String> {
    parse_deadline_in(s, &Local)
}

fn parse_deadline_in<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<DateTime<Utc>, String> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(local_to_utc(dt, tz));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(format!("Invalid deadline '{}'", s))
}

/// Ambiguous wall times take the earlier instant. Times skipped by a DST gap
/// take the zone's offset at the same reading in UTC.
fn local_to_utc<Tz: TimeZone>(dt: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&dt).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => {
            let offset = tz.offset_from_utc_datetime(&dt).fix();
            (dt - chrono::Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
        }
    }
}

/// Serde adapter for `#[serde(deserialize_with = ...)]`.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_deadline(&raw).map_err(serde::de::Error::custom)
}
