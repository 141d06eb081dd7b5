use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Accepted input format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Accepted input format for wall-clock times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Last representable second of a day; availability windows never run past it.
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

/// A half-open `[start, end)` interval within a single day.
///
/// Back-to-back slots (one ending exactly when the next starts) do not
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Build a slot, rejecting empty or inverted intervals.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(BookingError::validation(
                "time_slot",
                format!(
                    "start time {} must be before end time {}",
                    start.format(TIME_FORMAT),
                    end.format(TIME_FORMAT)
                ),
            ));
        }
        Ok(Self { start, end })
    }

    /// The one-hour window used by availability queries.
    ///
    /// Windows that would cross midnight are clamped to the end of the day.
    pub fn one_hour_from(start: NaiveTime) -> Self {
        let (end, wrapped) = start.overflowing_add_signed(TimeDelta::hours(1));
        let end = if wrapped != 0 { END_OF_DAY } else { end };
        Self { start, end }
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

/// Parse a `YYYY-MM-DD` date with a year in `[1, 9999]`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| {
        BookingError::validation("date", format!("'{input}' is not a YYYY-MM-DD date: {e}"))
    })?;

    if !(1..=9999).contains(&date.year()) {
        return Err(BookingError::validation(
            "date",
            format!("year {} is outside [1, 9999]", date.year()),
        ));
    }
    Ok(date)
}

/// Parse an `HH:MM` wall-clock time. `field` names the input in the error.
pub fn parse_time(field: &str, input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).map_err(|e| {
        BookingError::validation(field, format!("'{input}' is not an HH:MM time: {e}"))
    })
}
