//! Timestamp normalization for chat exports.
//!
//! Export timestamps are ISO-8601 with two common deviations that a strict
//! parser rejects:
//!
//! - a trailing `Z` instead of an explicit `+00:00` offset;
//! - fractional seconds with fewer than three digits (`.5`, `.12`).
//!
//! [`repair`] rewrites both, and [`normalize`] parses the repaired string.
//! Anything that still fails to parse yields `None`, never a panic or error.
//!
//! # Example
//!
//! ```
//! use chatsieve::core::timestamp::{normalize, repair};
//! use chrono::{NaiveDate, Timelike};
//!
//! assert_eq!(repair("2023-10-20T10:00:00.5Z"), "2023-10-20T10:00:00.500+00:00");
//!
//! let ts = normalize("2023-10-20T10:00:00.5Z").unwrap();
//! assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2023, 10, 20).unwrap());
//! assert_eq!(ts.naive().nanosecond(), 500_000_000);
//!
//! assert!(normalize("not-a-timestamp").is_none());
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Offset substituted for the `Z` marker.
const UTC_OFFSET: &str = "+00:00";

/// Character index where the time-zone region of `YYYY-MM-DDTHH:MM:SS` begins.
///
/// A `-` before this index is a date separator, never an offset sign.
const TZ_REGION_START: usize = 19;

/// Minimum number of fractional-second digits the strict parser accepts.
const MIN_FRACTION_DIGITS: usize = 3;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A successfully parsed timestamp.
///
/// Holds the wall-clock date and time exactly as written, plus the offset
/// when the string carried one. No conversion to UTC or local time happens,
/// so [`date`](Self::date) is the calendar date that appears in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    naive: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl ParsedTimestamp {
    /// Calendar date as written in the timestamp.
    pub fn date(&self) -> NaiveDate {
        self.naive.date()
    }

    /// Wall-clock date and time as written, without the offset.
    pub fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    /// The offset, if the timestamp had one.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// The timestamp as an offset-aware value, if it had an offset.
    pub fn as_fixed(&self) -> Option<DateTime<FixedOffset>> {
        self.offset
            .and_then(|off| self.naive.and_local_timezone(off).single())
    }

    /// The instant in UTC, if the timestamp had an offset.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.as_fixed().map(|dt| dt.to_utc())
    }
}

impl From<DateTime<FixedOffset>> for ParsedTimestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self {
            naive: dt.naive_local(),
            offset: Some(*dt.offset()),
        }
    }
}

impl From<NaiveDateTime> for ParsedTimestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Self {
            naive,
            offset: None,
        }
    }
}

/// Rewrites a loosely formatted timestamp into strict ISO-8601.
///
/// 1. Every `Z` becomes `+00:00`.
/// 2. Without a `.` nothing else changes.
/// 3. Otherwise the string is split into a main part and a time-zone part,
///    at the first `+`, or else at the first `-` at character index 19 or
///    later.
/// 4. The fraction after the first `.` of the main part is right-padded with
///    `0` to three digits. Longer fractions are kept as they are.
pub fn repair(raw: &str) -> String {
    let timestamp = raw.replace('Z', UTC_OFFSET);
    if !timestamp.contains('.') {
        return timestamp;
    }

    let tz_start = timestamp.find('+').or_else(|| {
        timestamp
            .char_indices()
            .skip(TZ_REGION_START)
            .find(|&(_, c)| c == '-')
            .map(|(idx, _)| idx)
    });

    let (main_part, tz_part) = match tz_start {
        Some(idx) => timestamp.split_at(idx),
        None => (timestamp.as_str(), ""),
    };

    let mut repaired = match main_part.split_once('.') {
        Some((date_part, frac)) if frac.chars().count() < MIN_FRACTION_DIGITS => {
            format!("{date_part}.{frac:0<width$}", width = MIN_FRACTION_DIGITS)
        }
        _ => main_part.to_string(),
    };
    repaired.push_str(tz_part);
    repaired
}

/// Normalizes and parses a timestamp string.
///
/// Returns `None` when the repaired string is not a valid ISO-8601 date,
/// date-time, or date-time with offset.
pub fn normalize(raw: &str) -> Option<ParsedTimestamp> {
    parse_strict(&repair(raw))
}

/// Strict ISO-8601 parse of an already repaired string.
fn parse_strict(s: &str) -> Option<ParsedTimestamp> {
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.into());
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.into());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(ParsedTimestamp::from)
}
