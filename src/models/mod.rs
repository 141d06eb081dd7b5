//! Domain models for room booking.
//!
//! - [`Room`]: reference data, seeded from configuration or the admin API.
//! - [`Reservation`]: a booking of one room for a half-open [`TimeSlot`] on one date.
//!   Created by booking, removed by cancellation, never edited in place.

mod reservation;
mod room;
mod slot;

pub use reservation::*;
pub use room::*;
pub use slot::*;
