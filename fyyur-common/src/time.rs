//! Timestamp utilities
//!
//! Show start times are naive timestamps interpreted as UTC.

use chrono::{NaiveDateTime, Utc};

/// Accepted `start_time` input formats, tried in order
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Canonical form used in form fields and for storage display
pub const FORM_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get current UTC time as a naive timestamp
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Parse a submitted start time
pub fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Human-readable start time for listings, e.g. `Sat 05, 21, 2035 9:30PM`
pub fn format_show_time(value: &NaiveDateTime) -> String {
    value.format("%a %m, %d, %Y %-I:%M%p").to_string()
}

/// Value to pre-fill a form field with
pub fn format_form_time(value: &NaiveDateTime) -> String {
    value.format(FORM_FORMAT).to_string()
}

/// A show is upcoming when it starts strictly after the evaluation time
pub fn is_upcoming(start_time: &NaiveDateTime, now: &NaiveDateTime) -> bool {
    start_time > now
}
