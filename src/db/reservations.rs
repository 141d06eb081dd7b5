use chrono::NaiveDate;
use rusqlite::{ffi, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};

use super::{format_date, format_time, parse_date, parse_time, Database};
use crate::error::{BookingError, Result};
use crate::models::{Reservation, TimeSlot};

const SELECT_RESERVATION: &str = "
    SELECT r.id, r.room_id, ro.name, r.date, r.start_time, r.end_time
    FROM reservations r
    INNER JOIN rooms ro ON r.room_id = ro.id";

// Half-open overlap: existing.start < requested.end AND requested.start < existing.end
const COUNT_OVERLAPPING: &str = "
    SELECT COUNT(*) FROM reservations
    WHERE room_id = ?1
      AND date = ?2
      AND start_time < ?4
      AND ?3 < end_time";

fn reservation_from_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        id: row.get(0)?,
        room_id: row.get(1)?,
        room_name: row.get(2)?,
        date: parse_date(3, row.get(3)?)?,
        start_time: parse_time(4, row.get(4)?)?,
        end_time: parse_time(5, row.get(5)?)?,
    })
}

fn count_overlapping(
    conn: &Connection,
    room_id: i64,
    date: NaiveDate,
    slot: &TimeSlot,
) -> rusqlite::Result<i64> {
    conn.query_row(
        COUNT_OVERLAPPING,
        (
            room_id,
            format_date(date),
            format_time(slot.start),
            format_time(slot.end),
        ),
        |row| row.get(0),
    )
}

impl Database {
    // ============================================================
    // Conflict checking
    // ============================================================

    /// Whether any reservation for `room_id` on `date` overlaps `slot`.
    ///
    /// Read-only. Storage failures are returned, never read as free or taken.
    pub fn is_conflicting(&self, room_id: i64, date: NaiveDate, slot: &TimeSlot) -> Result<bool> {
        let conn = self.lock()?;
        Ok(count_overlapping(&conn, room_id, date, slot)? > 0)
    }

    // ============================================================
    // Reservation operations
    // ============================================================

    /// Book `room_name` for `slot` on `date`.
    ///
    /// Room lookup, conflict check and insert run in one `IMMEDIATE`
    /// transaction, so concurrent writers on the same file cannot both pass
    /// the check. The overlap trigger rejects anything that slips through.
    pub fn insert_reservation(
        &self,
        room_name: &str,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<Reservation> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let room_id: i64 = tx
            .query_row("SELECT id FROM rooms WHERE name = ?", [room_name], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or_else(|| BookingError::NotFound(format!("room '{room_name}'")))?;

        if count_overlapping(&tx, room_id, date, &slot)? > 0 {
            return Err(unavailable(room_name, date, &slot));
        }

        let inserted = tx.execute(
            "INSERT INTO reservations (room_id, date, start_time, end_time) VALUES (?, ?, ?, ?)",
            (
                room_id,
                format_date(date),
                format_time(slot.start),
                format_time(slot.end),
            ),
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == ffi::SQLITE_CONSTRAINT_TRIGGER =>
            {
                return Err(unavailable(room_name, date, &slot));
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == ffi::SQLITE_CONSTRAINT_CHECK =>
            {
                return Err(BookingError::validation(
                    "time_slot",
                    format!("start time must be before end time, got {slot}"),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Reservation {
            id,
            room_id,
            room_name: room_name.to_string(),
            date,
            start_time: slot.start,
            end_time: slot.end,
        })
    }

    pub fn get_reservation(&self, id: i64) -> Result<Option<Reservation>> {
        let conn = self.lock()?;
        let reservation = conn
            .query_row(
                &format!("{SELECT_RESERVATION} WHERE r.id = ?"),
                [id],
                reservation_from_row,
            )
            .optional()?;
        Ok(reservation)
    }

    /// Delete a reservation, returning the removed row or `None` if the id is unknown.
    pub fn delete_reservation(&self, id: i64) -> Result<Option<Reservation>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(existing) = tx
            .query_row(
                &format!("{SELECT_RESERVATION} WHERE r.id = ?"),
                [id],
                reservation_from_row,
            )
            .optional()?
        else {
            return Ok(None);
        };

        tx.execute("DELETE FROM reservations WHERE id = ?", [id])?;
        tx.commit()?;

        Ok(Some(existing))
    }

    /// Reservations joined with room names, optionally filtered.
    ///
    /// Without a room filter rows are ordered by room name, date, start time;
    /// with one, by date and start time.
    pub fn list_reservations(
        &self,
        room_name: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Reservation>> {
        let date = date.map(format_date);
        let (predicate, order, args): (&str, &str, Vec<&str>) = match (room_name, date.as_deref()) {
            (Some(room), Some(date)) => (
                "WHERE ro.name = ? AND r.date = ?",
                "r.date, r.start_time",
                vec![room, date],
            ),
            (Some(room), None) => ("WHERE ro.name = ?", "r.date, r.start_time", vec![room]),
            (None, Some(date)) => (
                "WHERE r.date = ?",
                "ro.name, r.date, r.start_time",
                vec![date],
            ),
            (None, None) => ("", "ro.name, r.date, r.start_time", vec![]),
        };

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{SELECT_RESERVATION} {predicate} ORDER BY {order}"))?;

        let reservations = stmt
            .query_map(params_from_iter(args), reservation_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reservations)
    }
}

fn unavailable(room_name: &str, date: NaiveDate, slot: &TimeSlot) -> BookingError {
    BookingError::Conflict(format!(
        "room '{room_name}' is not available on {date} for {slot}"
    ))
}
