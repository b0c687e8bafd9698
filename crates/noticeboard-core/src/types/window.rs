//! UTC day windows.
//!
//! A [`DayWindow`] is the half-open interval `[start, end)` where `start` is
//! `00:00:00.000Z` of a calendar date and `end` is exactly 24 hours later.
//! Whatever time-of-day or offset the input carried is discarded after the
//! instant has been converted to UTC.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Half-open 24 hour UTC interval covering one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayWindow {
    /// Inclusive lower bound, always UTC midnight.
    pub start: DateTime<Utc>,
    /// Exclusive upper bound, `start + 24h`.
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Window for a calendar date.
    pub fn for_date(date: NaiveDate) -> AppResult<Self> {
        let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
        let end = start
            .checked_add_signed(TimeDelta::days(1))
            .ok_or_else(|| AppError::validation(format!("Date out of range: {date}")))?;
        Ok(Self { start, end })
    }

    /// Window of the UTC calendar day `instant` falls in.
    pub fn containing(instant: DateTime<Utc>) -> AppResult<Self> {
        Self::for_date(instant.date_naive())
    }

    /// Parse a date-like string into its window.
    ///
    /// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp with any offset, or a
    /// naive `YYYY-MM-DDTHH:MM:SS[.fff]` taken as UTC.
    pub fn parse(input: &str) -> AppResult<Self> {
        let input = input.trim();

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Self::for_date(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Self::containing(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
            return Self::containing(naive.and_utc());
        }

        Err(AppError::validation(format!("Invalid date: '{input}'")))
    }

    /// The calendar date this window covers.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// `start <= instant < end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for DayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            self.end.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        )
    }
}
