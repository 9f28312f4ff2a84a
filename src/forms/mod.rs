//! Request payloads accepted by the HTTP layer and their typed counterparts.

use chrono::{Datelike, NaiveDate, NaiveTime};

pub mod appointments;
pub mod services;
pub mod working_hours;

/// Parse a `YYYY-MM-DD` calendar date with a four-digit year.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .filter(|date| (1..=9999).contains(&date.year()))
}

/// Parse an `HH:MM` wall-clock time.
pub(crate) fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}
