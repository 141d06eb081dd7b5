use super::BookingService;
use crate::error::Result;
use crate::models::{parse_date, parse_time, AvailabilityQuery, Room, TimeSlot};

impl BookingService {
    /// Rooms with no reservation overlapping the one-hour window starting at
    /// `query.time` on `query.date`, in directory order.
    ///
    /// Every availability query is treated as a one-hour booking.
    pub fn list_available_rooms(&self, query: AvailabilityQuery) -> Result<Vec<Room>> {
        let date = parse_date(&query.date)?;
        let start = parse_time("time", &query.time)?;
        let window = TimeSlot::one_hour_from(start);

        let mut available = Vec::new();
        for room in self.db.get_all_rooms()? {
            if !self.db.is_conflicting(room.id, date, &window)? {
                available.push(room);
            }
        }

        tracing::debug!(
            "{} room(s) available on {} for {}",
            available.len(),
            date,
            window
        );
        Ok(available)
    }
}
