use crate::error::{BillingError, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fmt;

const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    In,
    Out,
}

/// Calendar month bucket used for the monthly cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for MonthKey {
    fn from(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A single card tap at a station gate.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TapEvent {
    pub user_id: String,
    pub direction: Direction,
    pub station: String,
    /// The instant of the tap, with the UTC offset it was recorded in.
    pub timestamp: DateTime<FixedOffset>,
}

impl TapEvent {
    pub fn new(
        user_id: impl Into<String>,
        direction: Direction,
        station: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            direction,
            station: station.into(),
            timestamp,
        }
    }

    /// The service-day this tap belongs to, in the tap's own local time.
    pub fn service_day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn month(&self) -> MonthKey {
        self.service_day().into()
    }
}

/// Parses an ISO-8601 timestamp.
///
/// Timestamps without an offset are taken as UTC. Timestamps with an offset
/// keep it, so a tap is bucketed into the day printed on it while ordering
/// still compares true instants.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset);
    }
    for format in OFFSET_FORMATS {
        if let Ok(with_offset) = DateTime::parse_from_str(raw, format) {
            return Ok(with_offset);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().fixed_offset())
        .ok_or_else(|| BillingError::InvalidTimestamp(raw.to_string()))
}
