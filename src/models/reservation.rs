use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// A confirmed booking of a room.
///
/// Rows exist only while the booking is confirmed: cancelling deletes the
/// row, and a rejected request never produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub room_id: i64,
    /// Display name of the booked room, joined in from the directory.
    pub room_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Reservation {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// Raw input for booking a room, as received from a form or JSON body.
///
/// Date is `YYYY-MM-DD`, times are `HH:MM`. Parsing happens in the booking
/// service so malformed values surface as validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationInput {
    pub room_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

/// Optional filters for listing reservations. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ReservationFilter {
    pub fn room_name(&self) -> Option<&str> {
        non_empty(self.room_name.as_deref())
    }

    pub fn date(&self) -> Option<&str> {
        non_empty(self.date.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Query for rooms free at a given date and time of day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub time: String,
}
