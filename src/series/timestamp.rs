//! Timestamp parsing and arithmetic.
//!
//! Both instruments write wall-clock timestamps without a zone, so everything
//! is handled as [`NaiveDateTime`]. Offsets in RFC 3339 input are folded into
//! UTC.

use chrono::{DateTime, NaiveDateTime};

/// Seconds in one hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Output format; the fraction is only written when non-zero
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Accepted textual layouts, tried in order
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp cell, returning `None` if no known layout matches.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Render a timestamp the way the combined table stores it.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(OUTPUT_FORMAT).to_string()
}

/// Signed seconds from `start` to `end`.
pub fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let delta = end - start;
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64 / 1e9,
        // beyond ~292 years of span; millisecond resolution is plenty there
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

/// Signed hours from `start` to `end`.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    seconds_between(start, end) / SECONDS_PER_HOUR
}
