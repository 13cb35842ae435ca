//! Wire timestamp parsing

use crate::error::FormatError;
use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};
use std::fmt;

/// The only timestamp layout the API emits
pub const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A decoded wire timestamp
///
/// The API sends wall-clock times without an offset. When the client is
/// configured with a time zone the wall clock is interpreted in that zone,
/// otherwise it stays naive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// No zone configured
    Naive(NaiveDateTime),
    /// Wall clock stamped with the configured zone
    Zoned(DateTime<Tz>),
}

impl Timestamp {
    /// Wall-clock fields as sent on the wire
    pub fn naive(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(naive) => *naive,
            Timestamp::Zoned(dt) => dt.naive_local(),
        }
    }

    /// The attached zone, if any
    pub fn zone(&self) -> Option<Tz> {
        match self {
            Timestamp::Naive(_) => None,
            Timestamp::Zoned(dt) => Some(dt.timezone()),
        }
    }

    /// ISO-8601 rendering, with offset when zoned
    pub fn to_iso_string(&self) -> String {
        match self {
            Timestamp::Naive(naive) => naive.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Timestamp::Zoned(dt) => dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` wire string
///
/// With a zone, the wall clock is stamped with it as-is (no conversion).
pub fn parse_timestamp(value: &str, zone: Option<Tz>) -> Result<Timestamp, FormatError> {
    let naive = NaiveDateTime::parse_from_str(value, WIRE_TIMESTAMP_FORMAT)
        .map_err(|e| FormatError::new(value, e))?;

    Ok(match zone {
        Some(zone) => Timestamp::Zoned(attach_zone(naive, zone)),
        None => Timestamp::Naive(naive),
    })
}

/// Interpret a naive wall-clock time as being in `zone`
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times in a
/// DST gap keep their wall clock and carry the offset in force at that
/// instant.
pub fn attach_zone(naive: NaiveDateTime, zone: Tz) -> DateTime<Tz> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let offset = zone.offset_from_utc_datetime(&naive);
            let shift = chrono::Duration::seconds(i64::from(offset.fix().local_minus_utc()));
            DateTime::from_naive_utc_and_offset(naive - shift, offset)
        }
    }
}
