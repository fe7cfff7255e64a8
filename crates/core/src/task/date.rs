//! Due date parsing and formatting
//!
//! Every stored due date uses the canonical millisecond ISO-8601 form, so
//! string comparison in the store matches chronological order. That only
//! holds for four digit years, so years outside 0000..=9999 are rejected.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const MAX_YEAR: i32 = 9999;

/// Parse a user supplied date, treating values without an offset as UTC
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    parse_any(raw).filter(|date| (0..=MAX_YEAR).contains(&date.year()))
}

fn parse_any(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(raw, format)
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    })
}

/// Canonical representation, e.g. `2025-01-29T10:00:00.000Z`
pub fn to_iso(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human readable form used in messages, e.g. `1/29/2025, 10:00:00 AM`
pub fn to_localized(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
