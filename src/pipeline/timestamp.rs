//! Timestamp parsing into site-local wall-clock time.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::error::SampleError;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse `raw` and return it as local time at `offset`.
///
/// Timestamps carrying a zone (RFC 3339, e.g. `...Z` or `...+02:00`) are
/// converted. Naive timestamps are assumed to already be local, and a bare
/// `YYYY-MM-DD` means local midnight.
pub fn parse_local(raw: &str, offset: &FixedOffset) -> Result<NaiveDateTime, SampleError> {
    // ---
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(offset).naive_local());
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(ts);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| SampleError::InvalidTimestamp(raw.to_string()))
}
