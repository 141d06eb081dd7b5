use rusqlite::{ErrorCode, OptionalExtension, Row};

use super::Database;
use crate::error::{BookingError, Result};
use crate::models::{CreateRoomInput, Room};

fn room_from_row(row: &Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        name: row.get(1)?,
        capacity: row.get(2)?,
    })
}

impl Database {
    // ============================================================
    // Room directory
    // ============================================================

    /// All rooms in directory order (by id).
    pub fn get_all_rooms(&self) -> Result<Vec<Room>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, capacity FROM rooms ORDER BY id")?;

        let rooms = stmt
            .query_map([], room_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rooms)
    }

    /// Directory lookup by exact name, for admin tooling and seeding checks.
    ///
    /// Booking does not go through here: it resolves the room inside its own
    /// transaction.
    pub fn get_room_by_name(&self, name: &str) -> Result<Option<Room>> {
        let conn = self.lock()?;
        let room = conn
            .query_row(
                "SELECT id, name, capacity FROM rooms WHERE name = ?",
                [name],
                room_from_row,
            )
            .optional()?;
        Ok(room)
    }

    pub fn create_room(&self, input: CreateRoomInput) -> Result<Room> {
        validate_room(&input)?;

        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT INTO rooms (name, capacity) VALUES (?, ?)",
            (&input.name, input.capacity),
        );

        match inserted {
            Ok(_) => Ok(Room {
                id: conn.last_insert_rowid(),
                name: input.name,
                capacity: input.capacity,
            }),
            Err(e) if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => Err(
                BookingError::Conflict(format!("room '{}' already exists", input.name)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert rooms that are not in the directory yet. Existing names are left untouched.
    ///
    /// Returns the number of rooms added.
    pub fn seed_rooms(&self, rooms: &[CreateRoomInput]) -> Result<usize> {
        for room in rooms {
            validate_room(room)?;
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut added = 0;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO rooms (name, capacity) VALUES (?, ?)")?;
            for room in rooms {
                added += stmt.execute((&room.name, room.capacity))?;
            }
        }
        tx.commit()?;

        Ok(added)
    }
}

fn validate_room(input: &CreateRoomInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(BookingError::validation("name", "room name must not be empty"));
    }
    if input.capacity == 0 {
        return Err(BookingError::validation(
            "capacity",
            "room capacity must be positive",
        ));
    }
    Ok(())
}
