//! Shared query parameter types

use crate::coerce::{attach_zone, Timestamp};
use crate::error::{Error, Result};
use crate::http::QueryParams;
use crate::pagination::DEFAULT_PAGE_SIZE;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;
use std::str::FromStr;

/// A date filter value
///
/// Dates are sent as midnight. Values without an offset are stamped with the
/// client's zone when one is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParam {
    /// Calendar date
    Date(NaiveDate),
    /// Wall-clock time without a zone
    Naive(NaiveDateTime),
    /// Instant with a known offset
    Zoned(DateTime<FixedOffset>),
}

impl DateParam {
    /// Render as an ISO-8601 query value
    pub fn to_query_value(&self, zone: Option<Tz>) -> String {
        let naive = match *self {
            DateParam::Zoned(dt) => return iso_zoned(&dt),
            DateParam::Date(date) => date.and_time(chrono::NaiveTime::MIN),
            DateParam::Naive(naive) => naive,
        };

        match zone {
            Some(zone) => iso_zoned(&attach_zone(naive, zone)),
            None => iso_naive(&naive),
        }
    }
}

impl FromStr for DateParam {
    type Err = Error;

    /// Accepts `2024-01-15`, `2024-01-15T08:00:00` or an RFC 3339 instant
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(DateParam::Zoned(dt));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(DateParam::Naive(naive));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateParam::Date)
            .map_err(|e| Error::config(format!("Invalid date '{s}': {e}")))
    }
}

impl From<NaiveDate> for DateParam {
    fn from(date: NaiveDate) -> Self {
        DateParam::Date(date)
    }
}

impl From<NaiveDateTime> for DateParam {
    fn from(naive: NaiveDateTime) -> Self {
        DateParam::Naive(naive)
    }
}

impl<Z: TimeZone> From<DateTime<Z>> for DateParam {
    fn from(dt: DateTime<Z>) -> Self {
        DateParam::Zoned(dt.fixed_offset())
    }
}

impl From<Timestamp> for DateParam {
    fn from(ts: Timestamp) -> Self {
        match ts {
            Timestamp::Naive(naive) => DateParam::Naive(naive),
            Timestamp::Zoned(dt) => DateParam::Zoned(dt.fixed_offset()),
        }
    }
}

fn iso_naive(naive: &NaiveDateTime) -> String {
    if naive.nanosecond() == 0 {
        naive.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn iso_zoned<Z: TimeZone>(dt: &DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    format!("{}{}", iso_naive(&dt.naive_local()), dt.format("%:z"))
}

/// Set a date filter when present
pub(crate) fn set_date(
    query: &mut QueryParams,
    key: &str,
    value: Option<DateParam>,
    zone: Option<Tz>,
) {
    if let Some(value) = value {
        query.set(key, value.to_query_value(zone));
    }
}

/// Paging and field selection for record sub-resources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page size (default 100)
    pub limit: Option<u32>,
    /// Starting offset (default 0)
    pub offset: Option<u32>,
    /// Fields to return
    pub fields: Vec<String>,
}

impl ListOptions {
    /// Options with an explicit page
    pub fn paged(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            fields: Vec::new(),
        }
    }

    pub(crate) fn to_query(&self) -> QueryParams {
        let mut query = page_query(self.limit, self.offset);
        query.set_list("fields", &self.fields);
        query
    }
}

pub(crate) fn page_query(limit: Option<u32>, offset: Option<u32>) -> QueryParams {
    QueryParams::paged(limit.unwrap_or(DEFAULT_PAGE_SIZE), offset.unwrap_or(0))
}
