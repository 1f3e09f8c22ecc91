// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as an RFC3339 string.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Parse a stored timestamp.
///
/// Accepts full RFC3339 timestamps and bare `YYYY-MM-DD` dates (read as
/// midnight UTC). Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    parse_week_of(raw).and_then(|date| date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()))
}

/// Parse a `weekOf` value (`YYYY-MM-DD`).
pub fn parse_week_of(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// The Monday starting the week that contains `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(offset)
}

/// `weekOf` string for the current UTC week.
pub fn current_week_of() -> String {
    week_start(Utc::now().date_naive())
        .format("%Y-%m-%d")
        .to_string()
}
