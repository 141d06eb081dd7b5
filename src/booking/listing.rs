use super::BookingService;
use crate::error::Result;
use crate::models::{parse_date, Reservation, ReservationFilter};

impl BookingService {
    /// Reservations matching the optional room and date filters.
    ///
    /// An unknown room name simply matches nothing.
    pub fn list_reservations(&self, filter: ReservationFilter) -> Result<Vec<Reservation>> {
        let date = filter.date().map(parse_date).transpose()?;
        self.db.list_reservations(filter.room_name(), date)
    }
}
