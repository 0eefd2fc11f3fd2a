//! Agenda views: one canonical ordering and the common filters used by the
//! owner agenda and the staff personal view

use crate::types::UnifiedBooking;

/// Sort by `date` then `time`, oldest first. Stable, so bookings in the same
/// slot keep their merge order (app before manual).
pub fn sort_chronologically(bookings: &mut [UnifiedBooking]) {
    bookings.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
}

/// Bookings on one `YYYY-MM-DD` day
pub fn on_date<'a>(bookings: &'a [UnifiedBooking], date: &str) -> Vec<&'a UnifiedBooking> {
    bookings.iter().filter(|b| b.date == date).collect()
}

/// Bookings assigned to one professional
pub fn for_professional<'a>(
    bookings: &'a [UnifiedBooking],
    pro_id: &str,
) -> Vec<&'a UnifiedBooking> {
    bookings.iter().filter(|b| b.pro_id == pro_id).collect()
}
