//! Timestamp utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamp usable as a file name prefix
///
/// RFC 3339 with millisecond precision, `:` and `.` replaced by `-`
/// (e.g. `2025-05-29T08-15-30-123Z`).
pub fn file_stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(|c: char| c == ':' || c == '.', "-")
}

/// Calendar date (`YYYY-MM-DD`)
pub fn calendar_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}
