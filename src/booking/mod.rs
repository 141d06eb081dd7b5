//! Booking operations: reservation lifecycle, availability and listing.
//!
//! # Reservation lifecycle
//!
//! A request is *requested* until [`BookingService::create_reservation`]
//! either confirms it (a row is persisted) or rejects it (validation,
//! unknown room, or conflict; nothing is persisted). A confirmed
//! reservation ends when [`BookingService::cancel_reservation`] deletes it.
//! There is no reschedule; cancel and book again instead.

mod availability;
mod listing;

use crate::db::Database;
use crate::error::{BookingError, Result};
use crate::models::*;

/// Entry point for booking operations over an explicitly passed [`Database`].
#[derive(Clone)]
pub struct BookingService {
    db: Database,
}

impl BookingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Book a room.
    ///
    /// Input is fully validated before storage is touched. The conflict
    /// check and the insert are atomic, so two overlapping requests for the
    /// same room never both succeed.
    pub fn create_reservation(&self, input: CreateReservationInput) -> Result<Reservation> {
        let date = parse_date(&input.date)?;
        let start = parse_time("start_time", &input.start_time)?;
        let end = parse_time("end_time", &input.end_time)?;
        let slot = TimeSlot::new(start, end)?;

        let room_name = input.room_name.trim();
        if room_name.is_empty() {
            return Err(BookingError::validation("room_name", "room name is required"));
        }

        match self.db.insert_reservation(room_name, date, slot) {
            Ok(reservation) => {
                tracing::info!(
                    id = reservation.id,
                    room = %reservation.room_name,
                    "Reservation created for {} {}",
                    date,
                    slot
                );
                Ok(reservation)
            }
            Err(e @ BookingError::Conflict(_)) => {
                tracing::warn!("Rejected reservation: {}", e);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Cancel a reservation by id, returning what was removed.
    ///
    /// Unknown ids yield [`BookingError::NotFound`].
    pub fn cancel_reservation(&self, id: i64) -> Result<Reservation> {
        let cancelled = self
            .db
            .delete_reservation(id)?
            .ok_or_else(|| BookingError::NotFound(format!("reservation {id}")))?;

        tracing::info!(
            id,
            room = %cancelled.room_name,
            "Reservation cancelled ({} {})",
            cancelled.date,
            cancelled.slot()
        );
        Ok(cancelled)
    }

    pub fn get_reservation(&self, id: i64) -> Result<Reservation> {
        self.db
            .get_reservation(id)?
            .ok_or_else(|| BookingError::NotFound(format!("reservation {id}")))
    }

    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        self.db.get_all_rooms()
    }

    pub fn create_room(&self, input: CreateRoomInput) -> Result<Room> {
        let room = self.db.create_room(input)?;
        tracing::info!(id = room.id, "Room '{}' added (capacity {})", room.name, room.capacity);
        Ok(room)
    }
}
