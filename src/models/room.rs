use serde::{Deserialize, Serialize};

/// A bookable room.
///
/// Rooms are reference data from the booking core's point of view: they are
/// listed and resolved by name, never modified by a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    /// Unique, human-readable name used to address the room when booking.
    pub name: String,
    pub capacity: u32,
}

/// Input for seeding a room into the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomInput {
    pub name: String,
    pub capacity: u32,
}
