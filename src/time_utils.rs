// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// Format a UTC timestamp as ISO 8601 with millisecond precision and a `Z` suffix.
pub fn format_iso_millis(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Add a (possibly fractional) number of minutes to a timestamp.
///
/// Returns `None` if `minutes` is not finite or the result is out of range.
pub fn add_minutes(date: DateTime<Utc>, minutes: f64) -> Option<DateTime<Utc>> {
    if !minutes.is_finite() {
        return None;
    }
    let millis = (minutes * 60_000.0).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64).and_then(|delta| date.checked_add_signed(delta))
}
